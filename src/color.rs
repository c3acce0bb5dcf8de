use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::error::ReportError;

/// 8-bit sRGB colour shared by the PDF writer and the viewer.
pub type Rgb8 = Srgb<u8>;

/// Blue and red of the seaborn "deep" palette.
pub const DEFAULT_SERIES_COLORS: [&str; 2] = ["#4c72b0", "#c44e52"];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

/// Parse `#rrggbb` (or `#rgb`) into a colour.
pub fn parse_hex(hex: &str) -> Result<Rgb8, ReportError> {
    Rgb8::from_str(hex.trim()).map_err(|_| ReportError::InvalidColor(hex.to_string()))
}

/// Colours for `n` series: the configured ones first, then generated hues.
pub fn series_colors(configured: &[String], n: usize) -> Result<Vec<Rgb8>, ReportError> {
    let mut colors = configured
        .iter()
        .take(n)
        .map(|c| parse_hex(c))
        .collect::<Result<Vec<_>, _>>()?;
    if colors.len() < n {
        let extra = generate_palette(n);
        colors.extend(extra.into_iter().skip(colors.len()));
    }
    Ok(colors)
}

// ---------------------------------------------------------------------------
// Backend conversions
// ---------------------------------------------------------------------------

pub fn to_color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_pdf_color(c: Rgb8) -> printpdf::Color {
    printpdf::Color::Rgb(printpdf::Rgb::new(
        f32::from(c.red) / 255.0,
        f32::from(c.green) / 255.0,
        f32::from(c.blue) / 255.0,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seaborn_defaults() {
        let blue = parse_hex(DEFAULT_SERIES_COLORS[0]).unwrap();
        assert_eq!((blue.red, blue.green, blue.blue), (0x4c, 0x72, 0xb0));
        assert!(parse_hex("not-a-color").is_err());
    }

    #[test]
    fn pads_with_generated_hues() {
        let configured = vec!["#000000".to_string()];
        let colors = series_colors(&configured, 3).unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], Srgb::new(0u8, 0, 0));
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn extra_configured_colors_are_ignored() {
        let configured: Vec<String> = DEFAULT_SERIES_COLORS.iter().map(|s| s.to_string()).collect();
        assert_eq!(series_colors(&configured, 1).unwrap().len(), 1);
    }
}
