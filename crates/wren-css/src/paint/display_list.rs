//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the recorded output of the paint pass, in painting
//! order (back to front).

use super::{Brush, Canvas};
use crate::box_model::{Point, Rect};
use crate::style::Font;
use crate::values::Color;

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a (possibly rounded) rectangle.
    ///
    /// Used for backgrounds.
    FillRect {
        /// The filled area.
        rect: Rect,
        /// Corner radii, `[nw, ne, se, sw]`. All zero for sharp corners.
        radii: [f32; 4],
        /// Fill.
        brush: Brush,
    },

    /// Fill a quadrilateral with a solid color.
    ///
    /// Used for border sides.
    FillPolygon {
        /// Corners in drawing order.
        points: [Point; 4],
        /// Fill color.
        color: Color,
    },

    /// Stroke a line.
    ///
    /// Used for `text-decoration`.
    DrawLine {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f32,
    },

    /// Draw a run of text.
    ///
    /// [CSS 2.1 Appendix E.2 Step 7](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// "the element's text"
    DrawText {
        /// The text content to draw.
        text: String,
        /// The font to set it in.
        font: Font,
        /// Text color.
        color: Color,
        /// Top-left corner of the word's box.
        origin: Point,
    },

    /// Draw an image (replaced element content).
    ///
    /// The `src` string is the key of the loaded image data.
    DrawImage {
        /// The `src` attribute value.
        src: String,
        /// Destination rectangle.
        rect: Rect,
    },
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issue every recorded command, in order, on another canvas.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            match command {
                DisplayCommand::FillRect { rect, radii, brush } => {
                    canvas.fill_rect(*rect, *radii, brush);
                }
                DisplayCommand::FillPolygon { points, color } => {
                    canvas.fill_polygon(*points, *color);
                }
                DisplayCommand::DrawLine {
                    from,
                    to,
                    color,
                    width,
                } => canvas.draw_line(*from, *to, *color, *width),
                DisplayCommand::DrawText {
                    text,
                    font,
                    color,
                    origin,
                } => canvas.draw_text(text, font, *color, *origin),
                DisplayCommand::DrawImage { src, rect } => canvas.draw_image(src, *rect),
            }
        }
    }

    /// The text of every [`DisplayCommand::DrawText`], in painting order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DisplayCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn fill_rect(&mut self, rect: Rect, radii: [f32; 4], brush: &Brush) {
        self.push(DisplayCommand::FillRect {
            rect,
            radii,
            brush: *brush,
        });
    }

    fn fill_polygon(&mut self, points: [Point; 4], color: Color) {
        self.push(DisplayCommand::FillPolygon { points, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.push(DisplayCommand::DrawLine {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, font: &Font, color: Color, origin: Point) {
        self.push(DisplayCommand::DrawText {
            text: text.to_string(),
            font: font.clone(),
            color,
            origin,
        });
    }

    fn draw_image(&mut self, src: &str, rect: Rect) {
        self.push(DisplayCommand::DrawImage {
            src: src.to_string(),
            rect,
        });
    }
}
