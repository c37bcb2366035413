use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;

use super::error::ChartRenderError;

pub(crate) const CHART_WIDTH_PX: u32 = 1200;
pub(crate) const CHART_HEIGHT_PX: u32 = 800;

pub(crate) struct ChartStyle;

impl ChartStyle {
    pub(crate) const MARGIN: i32 = 16;
    pub(crate) const CAPTION_FONT_FAMILY: &'static str = "sans-serif";
    pub(crate) const CAPTION_FONT_SIZE: i32 = 28;
    pub(crate) const X_LABEL_AREA_SIZE: u32 = 40;
    pub(crate) const Y_LABEL_AREA_SIZE: u32 = 56;
    pub(crate) const X_LABEL_COUNT: usize = 6;
    pub(crate) const Y_LABEL_COUNT: usize = 6;
    pub(crate) const BACKGROUND: RGBColor = WHITE;
    pub(crate) const PRODUCTION_AXIS_DESC: &'static str = "Production (MWh)";
    pub(crate) const INTENSITY_AXIS_DESC: &'static str = "Emissions (gCO2/kWh)";
}

/// Axis limits are fixed so charts of different windows overlay cleanly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisBounds {
    pub(crate) production_max_mwh: f64,
    pub(crate) intensity_max_g_per_kwh: f64,
}

const FALLBACK_PALETTE: &[RGBColor] = &[
    RGBColor(0x69, 0x61, 0x12),
    RGBColor(0x75, 0xbb, 0xfd),
    RGBColor(0x01, 0xff, 0x07),
    RGBColor(0x01, 0x0f, 0xcc),
    RGBColor(0xff, 0xff, 0x14),
    RGBColor(0xff, 0x94, 0x08),
    RGBColor(0xac, 0xff, 0xfc),
    RGBColor(0xed, 0x0d, 0xd9),
    RGBColor(0xe5, 0x00, 0x00),
    RGBColor(0x00, 0x00, 0x00),
    RGBColor(0xff, 0xb7, 0xce),
    RGBColor(0x65, 0x37, 0x00),
    RGBColor(0xbc, 0x13, 0xfe),
];

pub fn parse_hex_color(input: &str) -> Option<RGBColor> {
    let hex = input.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|character| character.is_ascii_hexdigit()) {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(red, green, blue))
}

/// Explicit config color wins, otherwise a stable palette slot per position.
pub(crate) fn country_color(explicit: Option<&str>, index: usize) -> RGBColor {
    explicit
        .and_then(parse_hex_color)
        .unwrap_or(FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()])
}

pub(crate) fn encode_png(
    width: u32,
    height: u32,
    rgb_buffer: Vec<u8>,
) -> Result<Vec<u8>, ChartRenderError> {
    let rgb_image = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| ChartRenderError::PngEncoding("image buffer conversion failed".to_string()))?;

    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb_image)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|error| ChartRenderError::PngEncoding(error.to_string()))?;

    Ok(output.into_inner())
}

#[cfg(test)]
mod tests {
    use plotters::style::RGBColor;

    use super::{country_color, parse_hex_color};

    #[test]
    fn parses_rrggbb_colors() {
        assert_eq!(parse_hex_color("#75bbfd"), Some(RGBColor(0x75, 0xbb, 0xfd)));
        assert_eq!(parse_hex_color("#000000"), Some(RGBColor(0, 0, 0)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_hex_color("75bbfd"), None);
        assert_eq!(parse_hex_color("#75bbf"), None);
        assert_eq!(parse_hex_color("#75bbfg"), None);
    }

    #[test]
    fn explicit_color_beats_the_palette() {
        assert_eq!(
            country_color(Some("#e50000"), 3),
            RGBColor(0xe5, 0x00, 0x00)
        );
        assert_eq!(country_color(None, 1), RGBColor(0x75, 0xbb, 0xfd));
    }
}
