use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

const ALL_CITIES: &str = "All cities";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: city dropdown and electric-range window.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let cities = dataset.cities().to_vec();
    let bounds = dataset.range_bounds();

    ui.strong("Select a City:");
    let mut city = state.city.clone();
    let mut city_changed = false;
    egui::ComboBox::from_id_salt("city_dropdown")
        .selected_text(city.as_deref().unwrap_or(ALL_CITIES))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            city_changed |= ui.selectable_value(&mut city, None, ALL_CITIES).changed();
            for c in &cities {
                city_changed |= ui
                    .selectable_value(&mut city, Some(c.clone()), c)
                    .changed();
            }
        });
    if city_changed {
        state.set_city(city);
    }

    ui.add_space(8.0);
    ui.strong("Select Electric Range:");
    match bounds {
        Some((lo, hi)) => {
            let (mut min, mut max) = (state.range_min, state.range_max);
            let mut changed = ui.add(egui::Slider::new(&mut min, lo..=hi).text("min")).changed();
            changed |= ui.add(egui::Slider::new(&mut max, lo..=hi).text("max")).changed();
            if ui.small_button("Full range").clicked() {
                (min, max) = (lo, hi);
                changed = true;
            }
            if changed {
                state.set_range(min, max);
            }
        }
        None => {
            ui.label("No electric range values in this dataset.");
        }
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(format!("{} vehicles on the map", state.markers.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.table_rows.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export table…"))
                .clicked()
            {
                export_table_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} vehicles loaded, {} cities",
                ds.len(),
                ds.cities().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle registrations")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_table_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export matching models")
        .add_filter("JSON", &["json"])
        .set_file_name("matching_models.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::data::export::write_records_json(&path, &state.table_rows) {
            log::error!("Failed to export table: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
