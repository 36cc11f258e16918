use eframe::egui::{self, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Vehicle lookup form
// ---------------------------------------------------------------------------

pub fn vehicle_lookup(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("lookup_form")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Enter Make:");
            ui.text_edit_singleline(&mut state.make_input);
            ui.end_row();

            ui.label("Enter Model:");
            ui.text_edit_singleline(&mut state.model_input);
            ui.end_row();
        });

    if ui.button("Submit").clicked() {
        state.submit_lookup();
        log::debug!(
            "lookup #{}: {:?} {:?} -> {:?}",
            state.submit_clicks,
            state.make_input,
            state.model_input,
            state.lookup
        );
    }

    if let Some(message) = state.lookup.message() {
        ui.add_space(4.0);
        for line in message.lines() {
            ui.label(line);
        }
    }
}
