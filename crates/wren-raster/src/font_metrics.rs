//! Font metrics backed by fontdue for text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use wren_css::{ApproximateFontMetrics, Font, FontMetrics};

use crate::fonts::FontSet;

/// Font metrics backed by fontdue's per-glyph metrics.
///
/// Queries the face [`PixmapCanvas`](crate::PixmapCanvas) will draw with,
/// using `Font::metrics()` rather than `Font::rasterize()` so that no
/// bitmaps are generated. When the set has no face for a font, the
/// measurement comes from [`ApproximateFontMetrics`].
pub struct FontdueFontMetrics<'a> {
    fonts: &'a FontSet,
}

impl<'a> FontdueFontMetrics<'a> {
    /// Measure with the faces of `fonts`.
    #[must_use]
    pub const fn new(fonts: &'a FontSet) -> Self {
        Self { fonts }
    }
}

impl FontMetrics for FontdueFontMetrics<'_> {
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        let Some(face) = self.fonts.select(font) else {
            return ApproximateFontMetrics.text_width(text, font);
        };
        let px = font.size_px();
        // Matches the cursor advance in PixmapCanvas::draw_text.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, px).advance_width)
            .sum()
    }

    fn line_height(&self, font: &Font) -> f32 {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        font.size_px() * 1.2
    }

    fn ascent(&self, font: &Font) -> f32 {
        self.fonts
            .select(font)
            .and_then(|face| face.horizontal_line_metrics(font.size_px()))
            .map_or_else(|| ApproximateFontMetrics.ascent(font), |m| m.ascent)
    }

    fn descent(&self, font: &Font) -> f32 {
        // fontdue reports the descent as a negative offset from the baseline.
        self.fonts
            .select(font)
            .and_then(|face| face.horizontal_line_metrics(font.size_px()))
            .map_or_else(|| ApproximateFontMetrics.descent(font), |m| -m.descent)
    }
}
