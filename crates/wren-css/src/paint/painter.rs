//! Painter - issues drawing calls for a measured box tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Boxes are painted in tree order, each one before its descendants. A box
//! paints, for every rectangle it occupies (one per line it spans, or its
//! bounds when it spans none): background, then border. Then its content
//! (text or image), its text decoration, its children and finally its list
//! marker.

use crate::box_model::{Point, Rect, Side};
use crate::boxes::{BoxId, BoxTree};
use crate::layout::FontMetrics;
use crate::style::Property;
use crate::values::Color;

use super::{Brush, Canvas};

/// Paint pass over one tree.
pub struct Painter<'a> {
    tree: &'a BoxTree,
    metrics: &'a dyn FontMetrics,
    scroll_offset: Point,
    link_regions: Vec<(BoxId, Rect)>,
}

impl<'a> Painter<'a> {
    /// Create a painter. `scroll_offset` is added to every coordinate.
    #[must_use]
    pub fn new(tree: &'a BoxTree, metrics: &'a dyn FontMetrics, scroll_offset: Point) -> Self {
        Self {
            tree,
            metrics,
            scroll_offset,
            link_regions: Vec::new(),
        }
    }

    /// Paint the whole tree onto `canvas`.
    ///
    /// Returns the screen rectangles of every `<a>` box painted, for hit
    /// testing.
    pub fn paint(mut self, canvas: &mut dyn Canvas) -> Vec<(BoxId, Rect)> {
        self.paint_box(canvas, self.tree.root());
        self.link_regions
    }

    fn paint_box(&mut self, canvas: &mut dyn Canvas, id: BoxId) {
        let tree = self.tree;
        let display = tree.display(id);
        if display == "none" {
            return;
        }

        // [CSS 2.1 § 17.6.1.1 Borders and Backgrounds around empty cells](https://www.w3.org/TR/CSS2/tables.html#empty-cells)
        //
        // "In the separated borders model, the 'empty-cells' property controls
        // the rendering of borders and backgrounds around cells that have no
        // visible content."
        if display == "table-cell"
            && tree.property(id, Property::EmptyCells) == "hide"
            && tree.is_space_or_empty(id)
        {
            return;
        }

        let areas: Vec<Rect> = {
            let rectangles = &tree.node(id).rectangles;
            if rectangles.is_empty() {
                vec![tree.bounds(id)]
            } else {
                rectangles.iter().map(|(_, r)| *r).collect()
            }
        }
        .into_iter()
        .map(|r| r.offset(self.scroll_offset.x, self.scroll_offset.y))
        .collect();

        let is_link = tree.tag_name(id) == "a";
        let last = areas.len().saturating_sub(1);
        for (i, &area) in areas.iter().enumerate() {
            if is_link {
                self.link_regions.push((id, area));
            }
            self.paint_background(canvas, id, area);
            self.paint_border(canvas, id, area, i == 0, i == last);
        }

        if tree.is_image(id) {
            self.paint_image(canvas, id);
        } else {
            self.paint_words(canvas, id);
        }

        self.paint_decoration(canvas, id, &areas);

        for &child in tree.children(id) {
            self.paint_box(canvas, child);
        }

        if let Some(marker) = tree.node(id).list_marker {
            self.paint_words(canvas, marker);
        }
    }

    /// [CSS 2.1 § 14.2 The background](https://www.w3.org/TR/CSS2/colors.html#background)
    ///
    /// Nothing is painted for a box whose containing block is justified, or
    /// whose background is transparent and has no gradient.
    fn paint_background(&self, canvas: &mut dyn Canvas, id: BoxId, area: Rect) {
        let tree = self.tree;
        if tree.property(tree.containing_block(id), Property::TextAlign) == "justify" {
            return;
        }

        let color = tree.actual_background_color(id);
        let gradient = tree.actual_background_gradient(id);
        let brush = if !gradient.is_empty() && area.width > 0.0 && area.height > 0.0 {
            Brush::LinearGradient {
                from: color,
                to: gradient,
                angle: tree.actual_background_gradient_angle(id),
            }
        } else if color.a == 0 {
            return;
        } else {
            Brush::Solid(color)
        };

        let radii = if tree.is_rounded(id) {
            tree.corner_radii(id)
        } else {
            [0.0; 4]
        };
        canvas.fill_rect(area, radii, &brush);
    }

    /// [CSS 2.1 § 8.5.3 Border style](https://www.w3.org/TR/CSS2/box.html#border-style-properties)
    ///
    /// "inset: The border makes the box look as though it were embedded in
    /// the canvas." "outset: The opposite of 'inset'."
    ///
    /// `inset` darkens the top and left sides, `outset` the right and bottom.
    /// A box split over several lines only has its left border on the first
    /// fragment and its right border on the last.
    fn paint_border(&self, canvas: &mut dyn Canvas, id: BoxId, area: Rect, first: bool, last: bool) {
        let tree = self.tree;
        let b = tree.border(id);
        let (l, t, r, bo) = (area.left(), area.top(), area.right(), area.bottom());

        if let Some(color) = self.side_color(id, Side::Top, b.top, "inset") {
            canvas.fill_polygon(
                [
                    Point::new(l, t),
                    Point::new(r, t),
                    Point::new(r - b.right, t + b.top),
                    Point::new(l + b.left, t + b.top),
                ],
                color,
            );
        }

        if last && let Some(color) = self.side_color(id, Side::Right, b.right, "outset") {
            canvas.fill_polygon(
                [
                    Point::new(r - b.right, t + b.top),
                    Point::new(r, t),
                    Point::new(r, bo),
                    Point::new(r - b.right, bo - b.bottom),
                ],
                color,
            );
        }

        if let Some(color) = self.side_color(id, Side::Bottom, b.bottom, "outset") {
            canvas.fill_polygon(
                [
                    Point::new(l + b.left, bo - b.bottom),
                    Point::new(r - b.right, bo - b.bottom),
                    Point::new(r, bo),
                    Point::new(l, bo),
                ],
                color,
            );
        }

        if first && let Some(color) = self.side_color(id, Side::Left, b.left, "inset") {
            canvas.fill_polygon(
                [
                    Point::new(l, t),
                    Point::new(l + b.left, t + b.top),
                    Point::new(l + b.left, bo - b.bottom),
                    Point::new(l, bo),
                ],
                color,
            );
        }
    }

    /// The color to paint one border side in, or `None` if the side is not
    /// drawn. The color is darkened when the side's style is `darkening`.
    fn side_color(&self, id: BoxId, side: Side, width: f32, darkening: &str) -> Option<Color> {
        let tree = self.tree;
        let style = tree.border_style(id, side);
        if width <= 0.0 || matches!(style, "none" | "hidden" | "") {
            return None;
        }

        let mut color = tree.actual_border_color(id, side);
        if color.is_empty() {
            color = tree.actual_color(id);
        }
        Some(if style == darkening { color.darken() } else { color })
    }

    /// The image fills its word, inset by the box's top border and padding.
    fn paint_image(&self, canvas: &mut dyn Canvas, id: BoxId) {
        let tree = self.tree;
        let Some(word) = tree.words(id).first() else {
            return;
        };
        let Some(src) = word.image_src() else {
            return;
        };

        let inset_top = tree.actual_border_width(id, Side::Top) + tree.actual_padding(id, Side::Top);
        let inset_height = tree.border(id).vertical() + tree.padding(id).vertical();
        let bounds = word.bounds();
        let rect = Rect::new(
            bounds.x + self.scroll_offset.x,
            bounds.y + inset_top + self.scroll_offset.y,
            bounds.width,
            bounds.height - inset_height,
        );
        canvas.draw_image(src, rect);
    }

    fn paint_words(&self, canvas: &mut dyn Canvas, id: BoxId) {
        let tree = self.tree;
        let words = tree.words(id);
        if words.is_empty() {
            return;
        }

        let font = tree.actual_font(id);
        let color = tree.actual_color(id);
        for word in words {
            if word.is_spaces() {
                continue;
            }
            let origin = Point::new(
                word.left + self.scroll_offset.x,
                word.top + self.scroll_offset.y,
            );
            canvas.draw_text(word.text(), &font, color, origin);
        }
    }

    /// [CSS 2.1 § 16.3.1 Underlining, overlining, striking](https://www.w3.org/TR/CSS2/text.html#lining-striking-props)
    ///
    /// Lines are placed from the font's descent and ascent, measured up from
    /// the bottom of each rectangle. The first rectangle starts after the
    /// left border and padding; the last ends before the right ones.
    fn paint_decoration(&self, canvas: &mut dyn Canvas, id: BoxId, areas: &[Rect]) {
        let tree = self.tree;
        let decoration = tree.property(id, Property::TextDecoration);
        if matches!(decoration, "" | "none") {
            return;
        }

        let font = tree.actual_font(id);
        let ascent = self.metrics.ascent(&font);
        let descent = self.metrics.descent(&font);
        let color = tree.actual_color(id);
        let padding = tree.padding(id);
        let border = tree.border(id);

        let last = areas.len().saturating_sub(1);
        for (i, area) in areas.iter().enumerate() {
            let mut y = match decoration {
                "underline" => area.bottom() - descent,
                "line-through" => area.bottom() - descent - ascent / 2.0,
                "overline" => area.bottom() - descent - ascent - 2.0,
                _ => return,
            };
            y -= padding.bottom - border.bottom;

            let mut x1 = area.left();
            if i == 0 {
                x1 += padding.left + border.left;
            }
            let mut x2 = area.right();
            if i == last {
                x2 -= padding.right + border.right;
            }

            canvas.draw_line(Point::new(x1, y), Point::new(x2, y), color, 1.0);
        }
    }
}
