mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::EvDashboardApp;
use clap::Parser;
use config::{Args, DashboardConfig, CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();
    let config = match DashboardConfig::resolve(&args, Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration, using defaults: {e:#}");
            DashboardConfig::default()
        }
    };
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Electric Vehicle Population Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EvDashboardApp::new(&config)))),
    )
}
