mod app;
mod color;
mod state;
mod ui;

use app::FlightDashboardApp;
use clap::Parser;
use eframe::egui;
use flight_dashboard::config::{Args, DashboardConfig};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from(Args::parse());
    log::info!("Starting dashboard with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Flight Data Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(FlightDashboardApp::new(&config)))),
    )
}
