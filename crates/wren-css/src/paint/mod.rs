//! Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The paint pass walks a measured box tree and issues drawing calls on a
//! [`Canvas`]. It never measures or moves anything.
//!
//! # Architecture
//!
//! ```text
//! Cascade → Layout → Paint → Canvas
//!                              ↓
//!                  DisplayList | raster backend
//! ```
//!
//! [`DisplayList`] is a canvas that only records, so the same pass can be
//! inspected in tests or replayed onto a real surface later.

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::Painter;

use crate::box_model::{Point, Rect};
use crate::style::Font;
use crate::values::Color;

/// How a filled area is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brush {
    /// One color.
    Solid(Color),
    /// Two-stop linear gradient across the filled rectangle.
    LinearGradient {
        /// Color at the start of the gradient line.
        from: Color,
        /// Color at the end of the gradient line.
        to: Color,
        /// Direction of the gradient line in degrees, clockwise from the
        /// positive x axis.
        angle: f32,
    },
}

/// The drawing half of the host's canvas capability.
///
/// Coordinates are CSS pixels with the scroll offset already applied.
pub trait Canvas {
    /// Fill `rect`, rounding its corners by `radii` (`[nw, ne, se, sw]`).
    fn fill_rect(&mut self, rect: Rect, radii: [f32; 4], brush: &Brush);

    /// Fill a convex quadrilateral. Border sides are drawn as trapezoids so
    /// adjoining sides of different colors meet on the diagonal.
    fn fill_polygon(&mut self, points: [Point; 4], color: Color);

    /// Stroke a straight line.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw `text` with the top-left of its line box at `origin`.
    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point);

    /// Draw the image loaded for `src`, scaled into `rect`.
    fn draw_image(&mut self, src: &str, rect: Rect);
}
