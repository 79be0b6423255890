//! Shared palette, sizing and fallbacks for the SVG charts.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::ChartsConfig;
use crate::errors::Result;

pub const PRIMARY: RGBColor = RGBColor(0x2C, 0x5F, 0x8A);
pub const SECONDARY: RGBColor = RGBColor(0x5B, 0xA4, 0xCF);
pub const ACCENT: RGBColor = RGBColor(0xF4, 0xA4, 0x60);
pub const NEGATIVE: RGBColor = RGBColor(0xC0, 0x39, 0x2B);
pub const POSITIVE: RGBColor = RGBColor(0x27, 0xAE, 0x60);
pub const GRID: RGBColor = RGBColor(0xE8, 0xE8, 0xE8);
pub const TEXT: RGBColor = RGBColor(0x33, 0x33, 0x33);
pub const MUTED: RGBColor = RGBColor(0x99, 0x99, 0x99);
pub const EMPTY_TILE: RGBColor = RGBColor(0xF0, 0xF0, 0xF0);

/// Ends of the sequential blue scale used by the state map
const BLUE_LOW: RGBColor = RGBColor(0xDE, 0xEB, 0xF7);
const BLUE_HIGH: RGBColor = RGBColor(0x08, 0x30, 0x6B);

pub const FONT: &str = "sans-serif";

/// Pixel size of a rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dims(&self) -> (u32, u32) {
        (self.width.max(200), self.height.max(150))
    }
}

impl Default for ChartSize {
    fn default() -> Self {
        Self::new(960, 480)
    }
}

impl From<&ChartsConfig> for ChartSize {
    fn from(config: &ChartsConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

pub fn caption_style() -> TextStyle<'static> {
    (FONT, 20).into_font().color(&TEXT)
}

pub fn label_style(size: u32) -> TextStyle<'static> {
    (FONT, size).into_font().color(&TEXT)
}

/// Upper axis bound with some headroom above the tallest value
pub fn headroom(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Last index of a categorical axis with `n` entries.
///
/// A segmented axis needs at least two points.
pub fn last_index(n: usize) -> i32 {
    (n as i32 - 1).max(1)
}

/// Linear interpolation along the blue scale, `t` in `[0, 1]`
pub fn blue_scale(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        lerp(BLUE_LOW.0, BLUE_HIGH.0),
        lerp(BLUE_LOW.1, BLUE_HIGH.1),
        lerp(BLUE_LOW.2, BLUE_HIGH.2),
    )
}

/// Dark tiles get white labels
pub fn text_on(fill: RGBColor) -> RGBColor {
    let luma = 0.299 * fill.0 as f64 + 0.587 * fill.1 as f64 + 0.114 * fill.2 as f64;
    if luma < 140.0 { WHITE } else { TEXT }
}

/// Placeholder chart for an empty selection
pub fn no_data_svg(size: ChartSize, title: &str) -> Result<String> {
    let (width, height) = size.dims();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        root.draw(&Text::new(
            title.to_string(),
            ((width / 2) as i32, 24),
            caption_style().pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        root.draw(&Text::new(
            "No data".to_string(),
            ((width / 2) as i32, (height / 2) as i32),
            (FONT, 18)
                .into_font()
                .color(&MUTED)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        root.present()?;
    }
    Ok(svg)
}
