use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

/// Line colour of the hourly chart.
pub const HOURLY_LINE: Color32 = Color32::from_rgb(240, 128, 128);

/// Bar colour of the departures-by-airport chart.
pub const DEPARTURE_BARS: Color32 = Color32::from_rgb(100, 149, 237);

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Palette generators
// ---------------------------------------------------------------------------

/// `n` soft, visually distinct colours using evenly spaced hues.
pub fn pastel_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.80);
            to_color32(hsl.into_color())
        })
        .collect()
}

/// `n` colours running from light green-teal to deep blue, busiest first.
pub fn sequential_palette(n: usize) -> Vec<Color32> {
    let light = Hsl::new(150.0, 0.45, 0.70);
    let dark = Hsl::new(230.0, 0.55, 0.30);
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
            to_color32(dark.mix(light, t).into_color())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Status colours
// ---------------------------------------------------------------------------

/// Maps each flight status to a slice colour for the distribution chart.
#[derive(Debug, Clone, Default)]
pub struct StatusColors {
    mapping: BTreeMap<String, Color32>,
}

impl StatusColors {
    /// Assign colours to `statuses` in order.
    pub fn new<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let statuses: Vec<&str> = statuses.into_iter().collect();
        let mapping = statuses
            .iter()
            .zip(pastel_palette(statuses.len()))
            .map(|(s, c)| (s.to_string(), c))
            .collect();
        StatusColors { mapping }
    }

    /// Look up the colour for a status.
    pub fn color_for(&self, status: &str) -> Color32 {
        self.mapping.get(status).copied().unwrap_or(Color32::GRAY)
    }
}
