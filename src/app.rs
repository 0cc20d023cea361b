use eframe::egui;

use flight_dashboard::config::DashboardConfig;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FlightDashboardApp {
    pub state: AppState,
}

impl FlightDashboardApp {
    /// Build the app and open the configured dataset if it exists.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        if config.data_file.exists() {
            state.load_path(&config.data_file);
        } else {
            log::warn!(
                "{} not found; open a dataset from the File menu",
                config.data_file.display()
            );
            state.status_message = Some(format!(
                "{} not found – use File → Open…",
                config.data_file.display()
            ));
        }
        Self { state }
    }
}

impl eframe::App for FlightDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &mut self.state);
        });
    }
}
