use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{lookup, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvDashboardApp {
    pub state: AppState,
}

impl EvDashboardApp {
    /// Build the app and load the configured dataset if it exists. A missing
    /// file leaves the dashboard empty with a hint in the status line.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        if config.data_path.exists() {
            state.load_path(&config.data_path);
        } else {
            log::warn!("Data file {} not found", config.data_path.display());
            state.status_message = Some(format!(
                "{} not found, use File → Open…",
                config.data_path.display()
            ));
        }
        Self { state }
    }
}

impl eframe::App for EvDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map, charts, table, lookup ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to view registrations  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard(ui, &mut self.state);
                });
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Electric Vehicle Population Dashboard");
    });

    section(ui, "Vehicle Map");
    plot::vehicle_map(ui, state);

    section(ui, "EV Registrations Over Time");
    plot::yearly_chart(ui, state);

    section(ui, "Enter Desired Electric Range:");
    table::matching_models(ui, state);

    section(ui, "CAFV Eligibility and EV Adoption by County");
    plot::eligibility_chart(ui, state);

    section(ui, "Vehicle Lookup:");
    lookup::vehicle_lookup(ui, state);
    ui.add_space(20.0);
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(20.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(title);
    });
    ui.separator();
}
