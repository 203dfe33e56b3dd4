mod app;
mod classifier;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::sync::Arc;

use app::FraudDetectorApp;
use classifier::{check_feature_contract, Classifier, RandomForest};
use config::Settings;
use eframe::egui;
use state::AppState;

/// Load the classifier once; the window still opens when this fails so the
/// user sees why predictions are unavailable.
fn load_classifier(settings: &Settings) -> Result<Arc<dyn Classifier>, String> {
    match RandomForest::load(&settings.model_path) {
        Ok(forest) => {
            log::info!(
                "Loaded {} with {} trees from {}",
                forest.name(),
                forest.n_trees(),
                settings.model_path.display()
            );
            if let Err(e) = check_feature_contract(&forest, &data::model::feature_names()) {
                log::warn!("Model feature layout differs from the input layout: {e}");
            }
            Ok(Arc::new(forest))
        }
        Err(e) => {
            log::error!("Failed to load classifier: {e:#}");
            Err(format!("{e:#}"))
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::default();
    let classifier = load_classifier(&settings);
    let window_size = settings.window_size;
    let state = AppState::new(settings, classifier);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Fraudulent Transaction Detection",
        options,
        Box::new(|_cc| Ok(Box::new(FraudDetectorApp::new(state)))),
    )
}
