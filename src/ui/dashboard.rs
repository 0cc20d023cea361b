use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use flight_dashboard::data::summary::{self, SummaryMetrics};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const WARNING: Color32 = Color32::from_rgb(250, 200, 60);

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, table and download
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = state.filtered_view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a flight dataset to begin  (File → Open…)");
        });
        return;
    };

    // Everything below is a projection of the working set.
    let metrics = SummaryMetrics::compute(&view);
    let hourly = summary::hourly_counts(&view);
    let departures = summary::departure_counts(&view);
    let top = summary::top_departures(&view, state.top_n);
    let statuses = summary::status_distribution(&view);
    let notice = state.outcome.notice.clone();
    let mut download = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("✈ Flight Data Dashboard");
            ui.label(
                "Flight information collected from the Aviationstack API. Explore flight \
                 statuses, departure and arrival details, and filter on flight parameters \
                 from the sidebar.",
            );

            if let Some(notice) = &notice {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("⚠ {notice}")).color(WARNING));
            }

            ui.add_space(8.0);
            ui.heading("📊 Flight Summary Statistics");
            metrics_row(ui, &metrics);

            ui.separator();
            ui.heading("📈 Visualizations");

            ui.strong("🕓 Flights by Departure Hour");
            plot::hourly_chart(ui, &hourly);
            ui.add_space(8.0);

            ui.strong("📍 Departures by Airport");
            plot::departures_chart(ui, &departures);
            ui.add_space(8.0);

            ui.strong("🛬 Flight Status Distribution");
            plot::status_pie(ui, &statuses);
            ui.add_space(8.0);

            ui.strong(format!("🏙 Top {} Departure Airports", state.top_n));
            plot::top_departures_chart(ui, &top);

            ui.separator();
            ui.heading("✈ Filtered Flight Data");
            table::flights_table(ui, "filtered_table", &view);

            ui.add_space(8.0);
            ui.heading("📥 Download Filtered Data");
            download = ui.button("Download CSV").clicked();

            ui.add_space(8.0);
            egui::CollapsingHeader::new("📄 Show Raw Data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if let Some(raw) = state.raw_view() {
                        table::flights_table(ui, "raw_table", &raw);
                    }
                });
        });

    if download {
        panels::save_file_dialog(state);
    }
}

fn metrics_row(ui: &mut Ui, metrics: &SummaryMetrics) {
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "✈ Total Flights", metrics.total_flights);
        metric(&mut cols[1], "🛫 Departure Airports", metrics.departure_airports);
        metric(&mut cols[2], "🛬 Arrival Airports", metrics.arrival_airports);
        metric(&mut cols[3], "🏢 Airlines", metrics.airlines);
    });
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value.to_string()).size(28.0).strong());
    });
}
