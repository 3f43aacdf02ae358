//! Text measurement.

use crate::style::Font;

/// Text measurement supplied by the host.
///
/// Layout never rasterizes text; it asks this trait how big text is. All
/// results are in CSS pixels.
pub trait FontMetrics {
    /// Advance width of `text` set in `font`.
    ///
    /// This should sum the advance width of each glyph in the string,
    /// matching the cursor advancement used during text rendering.
    fn text_width(&self, text: &str, font: &Font) -> f32;

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// Distance between the baselines of two consecutive lines of `font`.
    fn line_height(&self, font: &Font) -> f32;

    /// Height of the font above its baseline.
    fn ascent(&self, font: &Font) -> f32;

    /// Depth of the font below its baseline.
    fn descent(&self, font: &Font) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Without access to font data, every glyph advances 0.6× the font size.
/// Line spacing is 1.2×, split into 0.8× ascent, 0.2× descent and 0.2×
/// leading.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font.size_px() * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font: &Font) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font.size_px() * LINE_HEIGHT_RATIO
    }

    fn ascent(&self, font: &Font) -> f32 {
        font.size_px() * 0.8
    }

    fn descent(&self, font: &Font) -> f32 {
        font.size_px() * 0.2
    }
}
