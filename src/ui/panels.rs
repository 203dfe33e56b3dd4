use eframe::egui::{Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::dialogs::NativeDialogs;

const DESCRIPTION: &str = "To analyse transactions, load a CSV file.\n\n\
The file must contain these columns, in this order:\n\
transaction hour (0-23), 28 anonymized features, transaction amount.";

// ---------------------------------------------------------------------------
// Main panel
// ---------------------------------------------------------------------------

/// Render the description, the load button and the status lines.
pub fn main_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(10.0);
        ui.label(DESCRIPTION);
        ui.add_space(20.0);

        if ui.button("Load data and predict").clicked() {
            state.run(&mut NativeDialogs);
        }

        ui.add_space(10.0);
        match state.model_status() {
            Ok(name) => {
                ui.small(format!("Model: {name}"));
            }
            Err(e) => {
                ui.label(RichText::new(format!("Model not loaded: {e}")).color(Color32::RED));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.small(msg);
        }
    });
}
