use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::OrUnknown;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Matching models: numeric threshold + table
// ---------------------------------------------------------------------------

pub fn matching_models(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let mut min_range = state.min_range;
        let changed = ui
            .add(egui::DragValue::new(&mut min_range).speed(1.0).suffix(" mi"))
            .changed();
        if changed {
            state.set_min_range(min_range);
        }
        ui.label(format!("{} matching vehicles", state.table_rows.len()));
    });
    ui.add_space(4.0);

    let rows = &state.table_rows;
    ui.push_id("matching_models_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .min_scrolled_height(0.0)
            .max_scroll_height(300.0)
            .header(20.0, |mut header| {
                for title in ["Model Year", "Make", "Model", "Electric Range"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(r.model_year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.make);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.model);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(OrUnknown(r.electric_range).to_string());
                    });
                });
            });
    });
}
