//! Whole-document rendering.

use image::RgbaImage;
use wren_css::{DisplayList, InitialContainer, Size};

use crate::canvas::PixmapCanvas;
use crate::error::RasterError;
use crate::font_metrics::FontdueFontMetrics;
use crate::fonts::FontSet;

/// Lays out and draws documents with one set of font faces.
#[derive(Default)]
pub struct Renderer {
    fonts: FontSet,
}

impl Renderer {
    /// A renderer drawing with `fonts`.
    #[must_use]
    pub const fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }

    /// A renderer drawing with the faces found by [`FontSet::system`].
    #[must_use]
    pub fn with_system_fonts() -> Self {
        Self::new(FontSet::system())
    }

    /// The faces text is measured and drawn with.
    #[must_use]
    pub const fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Metrics agreeing with what this renderer draws.
    #[must_use]
    pub const fn metrics(&self) -> FontdueFontMetrics<'_> {
        FontdueFontMetrics::new(&self.fonts)
    }

    /// Measure `container` at `viewport` and draw it.
    ///
    /// The image is the size of the viewport, or with `full_page` tall
    /// enough for everything layout placed.
    ///
    /// The paint pass records into a [`DisplayList`] first; the list is
    /// then replayed onto a canvas that borrows the container's images.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] if the image would be empty.
    pub fn render(
        &self,
        container: &mut InitialContainer,
        viewport: Size,
        full_page: bool,
    ) -> Result<RgbaImage, RasterError> {
        let metrics = self.metrics();
        container.measure(&metrics, viewport);

        let mut list = DisplayList::new();
        container.paint(&mut list, &metrics);

        let height = if full_page {
            viewport.height.max(container.maximum_size().height)
        } else {
            viewport.height
        };
        let options = container.options();
        let mut canvas = PixmapCanvas::new(
            pixels(viewport.width),
            pixels(height),
            &self.fonts,
            container.images(),
        )?
        .with_anti_alias(
            !options.avoid_geometry_antialias,
            !options.avoid_text_antialias,
        );
        list.replay(&mut canvas);

        Ok(canvas.to_rgba_image())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(length: f32) -> u32 {
    length.ceil().max(0.0) as u32
}
