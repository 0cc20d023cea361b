use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use flight_dashboard::data::export::EXPORT_FILE_NAME;
use flight_dashboard::data::filter::ALL_AIRLINES;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – search and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Search & Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the widgets.
    let options = state.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Flight number search ----
            ui.strong("Search by Flight Number (IATA):");
            if ui
                .text_edit_singleline(&mut state.criteria.search)
                .changed()
            {
                state.refilter();
            }
            ui.add_space(6.0);

            // ---- Airline ----
            ui.strong("Filter by Airline");
            let current = state
                .criteria
                .airline
                .clone()
                .unwrap_or_else(|| ALL_AIRLINES.to_string());
            egui::ComboBox::from_id_salt("airline")
                .selected_text(current.as_str())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    let choices =
                        std::iter::once(ALL_AIRLINES).chain(options.airlines.iter().map(String::as_str));
                    for choice in choices {
                        if ui.selectable_label(current == choice, choice).clicked() {
                            state.set_airline(choice);
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Departure airports / statuses (multi-select) ----
            let n_airports = state.criteria.airports.len();
            egui::CollapsingHeader::new(
                RichText::new(format!(
                    "Filter by Departure Airport(s)  ({n_airports}/{})",
                    options.airports.len()
                ))
                .strong(),
            )
            .id_salt("airports")
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.criteria.airports.clear();
                    state.refilter();
                }
                for airport in &options.airports {
                    let mut checked = state.criteria.airports.contains(airport);
                    if ui.checkbox(&mut checked, airport.as_str()).changed() {
                        state.toggle_airport(airport);
                    }
                }
            });

            let n_statuses = state.criteria.statuses.len();
            egui::CollapsingHeader::new(
                RichText::new(format!(
                    "Filter by Flight Status(es)  ({n_statuses}/{})",
                    options.statuses.len()
                ))
                .strong(),
            )
            .id_salt("statuses")
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.criteria.statuses.clear();
                    state.refilter();
                }
                for status in &options.statuses {
                    let mut checked = state.criteria.statuses.contains(status);
                    if ui.checkbox(&mut checked, status.as_str()).changed() {
                        state.toggle_status(status);
                    }
                }
            });
            ui.add_space(6.0);

            // ---- Departure date range ----
            ui.strong("Filter by Departure Date:");
            date_range_controls(ui, state);
        });
}

fn date_range_controls(ui: &mut Ui, state: &mut AppState) {
    let mut changed = false;

    if let [from, to] = state.date_selection.as_mut_slice() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("From");
            changed |= ui
                .add(DatePickerButton::new(from).id_salt("date_from"))
                .changed();
        });
        ui.horizontal(|ui: &mut Ui| {
            ui.label("To");
            changed |= ui.add(DatePickerButton::new(to).id_salt("date_to")).changed();
        });
        if ui.small_button("Any date").clicked() {
            state.clear_dates();
            return;
        }
    } else {
        ui.label(RichText::new("Any date").italics());
        if !state.options.default_dates.is_empty() && ui.small_button("Pick range").clicked() {
            state.reset_dates();
            return;
        }
    }

    if changed {
        state.refilter();
    }
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
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} flights loaded, {} shown",
                ds.len(),
                state.outcome.indices.len()
            ));
        }

        if let Some(path) = &state.source {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
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
        .set_title("Open flight data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
