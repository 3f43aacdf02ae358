//! A [`Canvas`] that draws into a pixel buffer.
//!
//! Shapes go through `tiny-skia`; glyphs are rasterized by `fontdue` and
//! images are sampled nearest-neighbor, both blended straight into the
//! buffer.

use std::collections::HashMap;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, SpreadMode, Stroke,
    Transform,
};
use wren_common::image::LoadedImage;
use wren_css::{Brush, Canvas, Color, Font, Point, Rect};

use crate::error::RasterError;
use crate::fonts::FontSet;

/// Cubic Bézier control distance for a quarter circle: 4/3 * tan(π/8).
const KAPPA: f32 = 0.552_284_8;

/// Pixel buffer plus the fonts and images drawing needs.
pub struct PixmapCanvas<'a> {
    pixmap: Pixmap,
    fonts: &'a FontSet,
    images: &'a HashMap<String, LoadedImage>,
    anti_alias_geometry: bool,
    anti_alias_text: bool,
}

impl<'a> PixmapCanvas<'a> {
    /// A white canvas of `width` by `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] if either dimension is zero.
    pub fn new(
        width: u32,
        height: u32,
        fonts: &'a FontSet,
        images: &'a HashMap<String, LoadedImage>,
    ) -> Result<Self, RasterError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(Self {
            pixmap,
            fonts,
            images,
            anti_alias_geometry: true,
            anti_alias_text: true,
        })
    }

    /// Turn anti-aliasing of shapes and of glyphs on or off.
    #[must_use]
    pub fn with_anti_alias(mut self, geometry: bool, text: bool) -> Self {
        self.anti_alias_geometry = geometry;
        self.anti_alias_text = text;
        self
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The color at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color {
                r: c.red(),
                g: c.green(),
                b: c.blue(),
                a: c.alpha(),
            }
        })
    }

    /// Copy the buffer out as straight-alpha RGBA.
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let c = self.pixel(x, y).unwrap_or(Color::EMPTY);
            Rgba([c.r, c.g, c.b, c.a])
        })
    }

    /// Save the buffer to `path`, in the format its extension names.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Save`] if the image cannot be encoded or
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), RasterError> {
        self.to_rgba_image()
            .save(path)
            .map_err(|source| RasterError::Save {
                path: path.to_path_buf(),
                source,
            })
    }

    fn solid_paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias_geometry;
        paint
    }

    /// The gradient line runs through the center of `rect` at `angle`
    /// degrees and is just long enough to reach both far corners.
    fn brush_paint(&self, brush: &Brush, rect: Rect) -> Option<Paint<'static>> {
        match *brush {
            Brush::Solid(color) => Some(self.solid_paint(color)),
            Brush::LinearGradient { from, to, angle } => {
                let (sin, cos) = angle.to_radians().sin_cos();
                let half = (rect.width * cos).abs().mul_add(0.5, (rect.height * sin).abs() * 0.5);
                let cx = rect.x + rect.width / 2.0;
                let cy = rect.y + rect.height / 2.0;

                let mut paint = Paint::default();
                paint.anti_alias = self.anti_alias_geometry;
                paint.shader = LinearGradient::new(
                    tiny_skia::Point::from_xy(cos.mul_add(-half, cx), sin.mul_add(-half, cy)),
                    tiny_skia::Point::from_xy(cos.mul_add(half, cx), sin.mul_add(half, cy)),
                    vec![
                        GradientStop::new(0.0, skia_color(from)),
                        GradientStop::new(1.0, skia_color(to)),
                    ],
                    SpreadMode::Pad,
                    Transform::identity(),
                )?;
                Some(paint)
            }
        }
    }

    /// Source-over blend of `color` at `coverage` onto one pixel. Pixels
    /// outside the canvas are ignored.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let width = self.pixmap.width();
        if x >= width || y >= self.pixmap.height() {
            return;
        }

        let alpha = f32::from(coverage) / 255.0 * (f32::from(color.a) / 255.0);
        let index = ((y * width + x) * 4) as usize;
        let data = self.pixmap.data_mut();

        // The buffer is premultiplied.
        let out_alpha = f32::from(data[index + 3]).mul_add(1.0 - alpha, 255.0 * alpha);
        for (i, channel) in [color.r, color.g, color.b].into_iter().enumerate() {
            let out = f32::from(channel).mul_add(alpha, f32::from(data[index + i]) * (1.0 - alpha));
            data[index + i] = out.min(out_alpha).round() as u8;
        }
        data[index + 3] = out_alpha.round() as u8;
    }
}

impl Canvas for PixmapCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, radii: [f32; 4], brush: &Brush) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let path = if radii.iter().any(|&r| r > 0.0) {
            rounded_rect_path(rect, radii)
        } else {
            tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
                .map(PathBuilder::from_rect)
        };
        let (Some(path), Some(paint)) = (path, self.brush_paint(brush, rect)) else {
            return;
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn fill_polygon(&mut self, points: [Point; 4], color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        pb.close();
        // A degenerate polygon (a zero-width side) has no path.
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.solid_paint(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.solid_paint(color);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point) {
        let fonts = self.fonts;
        let Some(face) = fonts.select(font) else {
            return;
        };

        let px = font.size_px();
        let ascent = face
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent);
        let baseline = origin.y + ascent;
        let mut cursor_x = origin.x;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = face.rasterize(ch, px);

            // fontdue places the bitmap relative to the baseline origin.
            let glyph_x = (cursor_x + metrics.xmin as f32).round() as i32;
            let glyph_y = (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let mut coverage = bitmap[gy * metrics.width + gx];
                    if !self.anti_alias_text {
                        coverage = if coverage >= 128 { 255 } else { 0 };
                    }
                    if coverage > 0 {
                        self.blend(glyph_x + gx as i32, glyph_y + gy as i32, color, coverage);
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }

    /// Nearest-neighbor sampling of the source pixels into `rect`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_image(&mut self, src: &str, rect: Rect) {
        let images = self.images;
        let Some(img) = images.get(src) else {
            return;
        };

        let dest_x = rect.x.round() as i32;
        let dest_y = rect.y.round() as i32;
        let dest_w = rect.width.max(0.0) as u32;
        let dest_h = rect.height.max(0.0) as u32;
        let (src_w, src_h) = (img.width(), img.height());
        if src_w == 0 || src_h == 0 || dest_w == 0 || dest_h == 0 {
            return;
        }

        let data = img.rgba_data();
        for dy in 0..dest_h {
            for dx in 0..dest_w {
                let sx = ((u64::from(dx) * u64::from(src_w)) / u64::from(dest_w))
                    .min(u64::from(src_w) - 1) as u32;
                let sy = ((u64::from(dy) * u64::from(src_h)) / u64::from(dest_h))
                    .min(u64::from(src_h) - 1) as u32;
                let i = ((sy * src_w + sx) * 4) as usize;
                let Some(&[r, g, b, a]) = data.get(i..i + 4) else {
                    continue;
                };
                if a > 0 {
                    self.blend(dest_x + dx as i32, dest_y + dy as i32, Color::rgb(r, g, b), a);
                }
            }
        }
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Outline of `rect` with each corner (`[nw, ne, se, sw]`) rounded by a
/// quarter ellipse. Radii are clamped to half the shorter side.
fn rounded_rect_path(rect: Rect, radii: [f32; 4]) -> Option<tiny_skia::Path> {
    let limit = rect.width.min(rect.height) / 2.0;
    let [nw, ne, se, sw] = radii.map(|r| r.max(0.0).min(limit));
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let k = 1.0 - KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + nw, t);
    pb.line_to(r - ne, t);
    pb.cubic_to(ne.mul_add(-k, r), t, r, ne.mul_add(k, t), r, t + ne);
    pb.line_to(r, b - se);
    pb.cubic_to(r, se.mul_add(-k, b), se.mul_add(-k, r), b, r - se, b);
    pb.line_to(l + sw, b);
    pb.cubic_to(sw.mul_add(k, l), b, l, sw.mul_add(-k, b), l, b - sw);
    pb.line_to(l, t + nw);
    pb.cubic_to(l, nw.mul_add(k, t), nw.mul_add(k, l), t, l + nw, t);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas<'a>(
        fonts: &'a FontSet,
        images: &'a HashMap<String, LoadedImage>,
    ) -> PixmapCanvas<'a> {
        PixmapCanvas::new(20, 20, fonts, images).unwrap()
    }

    #[test]
    fn test_new_canvas_is_white() {
        let (fonts, images) = (FontSet::default(), HashMap::new());
        let c = canvas(&fonts, &images);
        assert_eq!(c.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(c.pixel(20, 0), None);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let (fonts, images) = (FontSet::default(), HashMap::new());
        let result = PixmapCanvas::new(0, 10, &fonts, &images);
        assert!(matches!(
            result,
            Err(RasterError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_blend_is_source_over() {
        let (fonts, images) = (FontSet::default(), HashMap::new());
        let mut c = canvas(&fonts, &images);
        c.blend(1, 1, Color::BLACK, 255);
        c.blend(2, 2, Color::BLACK, 0);
        c.blend(-1, 50, Color::BLACK, 255);

        assert_eq!(c.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(c.pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_rounded_path_stays_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let path = rounded_rect_path(rect, [20.0, 0.0, 3.0, 3.0]).unwrap();
        let bounds = path.bounds();
        assert!(bounds.left() >= -1e-3 && bounds.right() <= 10.0 + 1e-3);
        assert!(bounds.top() >= -1e-3 && bounds.bottom() <= 10.0 + 1e-3);
    }
}
