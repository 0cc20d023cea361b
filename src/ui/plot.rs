use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use flight_dashboard::data::summary::StatusShare;

use crate::color::{self, StatusColors};

const CHART_HEIGHT: f32 = 260.0;

/// A plot that sits inside the scrolling dashboard without stealing the
/// scroll wheel.
fn static_plot(id: &str) -> Plot {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
}

/// Axis formatter that prints `labels[i]` at integer position `i`.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Flights by departure hour (line + markers)
// ---------------------------------------------------------------------------

pub fn hourly_chart(ui: &mut Ui, counts: &BTreeMap<u32, usize>) {
    let points: Vec<[f64; 2]> = counts
        .iter()
        .map(|(&hour, &n)| [hour as f64, n as f64])
        .collect();

    static_plot("hourly_chart")
        .x_axis_label("Departure Hour")
        .y_axis_label("Number of Flights")
        .include_x(0.0)
        .include_x(23.0)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Flights by Hour of Departure")
                    .color(color::HOURLY_LINE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(color::HOURLY_LINE),
            );
        });
}

// ---------------------------------------------------------------------------
// Departures by airport (vertical bars)
// ---------------------------------------------------------------------------

pub fn departures_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (airport, n))| Bar::new(i as f64, *n as f64).name(airport).width(0.7))
        .collect();
    let labels = counts.iter().map(|(a, _)| a.clone()).collect();

    static_plot("departures_chart")
        .x_axis_label("Airport")
        .y_axis_label("Departures")
        .x_axis_formatter(category_formatter(labels))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color::DEPARTURE_BARS).name("Departures"));
        });
}

// ---------------------------------------------------------------------------
// Top departure airports (horizontal bars, busiest on top)
// ---------------------------------------------------------------------------

pub fn top_departures_chart(ui: &mut Ui, top: &[(String, usize)]) {
    let palette = color::sequential_palette(top.len());
    let n = top.len();

    // Row 0 is drawn at the top, so it gets the highest y position.
    let bars: Vec<Bar> = top
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((airport, count), fill))| {
            Bar::new((n - 1 - i) as f64, *count as f64)
                .name(airport)
                .fill(fill)
                .width(0.7)
        })
        .collect();
    let labels = top.iter().rev().map(|(a, _)| a.clone()).collect();

    static_plot("top_departures_chart")
        .x_axis_label("Number of Departures")
        .y_axis_label("Airport")
        .y_axis_formatter(category_formatter(labels))
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Flight status distribution (pie)
// ---------------------------------------------------------------------------

/// Largest arc drawn as one triangle.
const MAX_SEGMENT: f32 = TAU / 96.0;

/// Matplotlib's `startangle=140`, counter-clockwise.
const START_ANGLE_DEG: f32 = 140.0;

pub fn status_pie(ui: &mut Ui, shares: &[StatusShare]) {
    if shares.is_empty() {
        ui.label("No status data.");
        return;
    }
    let colors = StatusColors::new(shares.iter().map(|s| s.status.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let size = CHART_HEIGHT.min(ui.available_width() * 0.6);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size * 0.45;

        let mut angle = START_ANGLE_DEG.to_radians();
        for share in shares {
            let sweep = share.fraction as f32 * TAU;
            let fill = colors.color_for(&share.status);
            draw_wedge(&painter, center, radius, angle, sweep, fill);

            let mid = angle + sweep / 2.0;
            painter.text(
                polar(center, radius * 0.6, mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", share.fraction * 100.0),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
            angle += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for share in shares {
                ui.horizontal(|ui: &mut Ui| {
                    ui.colored_label(colors.color_for(&share.status), "■");
                    ui.label(format!("{} ({})", share.status, share.count));
                });
            }
        });
    });
}

/// Point at `angle` radians (counter-clockwise from +x) on screen.
fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), -angle.sin()) * radius
}

fn draw_wedge(painter: &egui::Painter, center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) {
    if sweep <= 0.0 {
        return;
    }
    let pieces = (sweep / MAX_SEGMENT).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    for p in 0..pieces {
        let a0 = start + step * p as f32;
        let a1 = a0 + step;
        let points = vec![center, polar(center, radius, a0), polar(center, radius, a1)];
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }
    painter.add(Shape::line_segment(
        [center, polar(center, radius, start)],
        Stroke::new(1.0, Color32::WHITE),
    ));
}
