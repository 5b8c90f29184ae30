use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Hue step between consecutive group colours (golden angle), so any number
/// of groups stays visually distinct without knowing the total up front.
const GOLDEN_ANGLE: f32 = 137.507_77;

fn hsl_to_color32(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0))
        .collect()
}

// ---------------------------------------------------------------------------
// Group colours as hex strings
// ---------------------------------------------------------------------------

/// Colour of the `index`-th created group, as `#rrggbb`.
pub fn group_color(index: usize) -> String {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    to_hex(hsl_to_color32(hue))
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Parse `#rrggbb` (leading `#` optional). Anything else yields `None`.
pub fn parse_hex(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
