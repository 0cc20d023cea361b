use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use flight_dashboard::data::model::FlightView;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable grid of every input column for the rows of `view`.
pub fn flights_table(ui: &mut Ui, id: &str, view: &FlightView<'_>) {
    let columns = view.columns();

    ui.push_id(id, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .max_scroll_height(320.0);
        for _ in columns {
            builder = builder.column(Column::auto().at_least(80.0).clip(true));
        }

        builder
            .header(22.0, |mut header| {
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let Some(record) = view.get(row.index()) else {
                        return;
                    };
                    for cell in &record.cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.as_deref().unwrap_or(""));
                        });
                    }
                });
            });
    });
}
