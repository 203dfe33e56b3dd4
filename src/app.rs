use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FraudDetectorApp {
    pub state: AppState,
}

impl FraudDetectorApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FraudDetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::main_panel(ui, &mut self.state);
        });
    }
}
