use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Fill for every bar chart.
pub const BAR_HEX: &str = "#660099";

/// Slice colours of the gender pie, in order.
pub const PIE_HEX: [&str; 7] = [
    "#660099", "#bd4aff", "#eb3c7d", "#380054", "#940099", "#C10099", "#FF5C7D",
];

/// Parse a `#rrggbb` string. Falls back to grey on malformed input.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("invalid colour {hex:?}: {e}");
            Color32::GRAY
        }
    }
}

pub fn bar_color() -> Color32 {
    hex_color(BAR_HEX)
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `n` slice colours: the fixed pie palette first, generated hues after it.
pub fn pie_palette(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = PIE_HEX.iter().take(n).map(|h| hex_color(h)).collect();
    if n > colors.len() {
        colors.extend(generate_palette(n - colors.len()));
    }
    colors
}
