//! [CSS 2.1 § 6.1.3 Computed values](https://www.w3.org/TR/CSS2/cascade.html#computed-value)
//! and [§ 6.1.4 Actual values](https://www.w3.org/TR/CSS2/cascade.html#actual-value)
//!
//! Actual values are resolved from the declared strings on first read and
//! memoized on the box. Percentages of box edges resolve against the box's
//! own width as it is at the time of that first read; later width changes
//! do not re-resolve them.

use super::{BoxId, BoxTree};
use crate::box_model::{Corner, EdgeSizes, Side};
use crate::style::{Font, Property, font};
use crate::values::{Color, border_width, parse_length, parse_number, split_values};

const PADDING: [Property; 4] = [
    Property::PaddingTop,
    Property::PaddingRight,
    Property::PaddingBottom,
    Property::PaddingLeft,
];

const MARGIN: [Property; 4] = [
    Property::MarginTop,
    Property::MarginRight,
    Property::MarginBottom,
    Property::MarginLeft,
];

const BORDER_WIDTH: [Property; 4] = [
    Property::BorderTopWidth,
    Property::BorderRightWidth,
    Property::BorderBottomWidth,
    Property::BorderLeftWidth,
];

const BORDER_STYLE: [Property; 4] = [
    Property::BorderTopStyle,
    Property::BorderRightStyle,
    Property::BorderBottomStyle,
    Property::BorderLeftStyle,
];

const BORDER_COLOR: [Property; 4] = [
    Property::BorderTopColor,
    Property::BorderRightColor,
    Property::BorderBottomColor,
    Property::BorderLeftColor,
];

const CORNER_RADIUS: [Property; 4] = [
    Property::CornerNwRadius,
    Property::CornerNeRadius,
    Property::CornerSeRadius,
    Property::CornerSwRadius,
];

impl BoxTree {
    /// [CSS 2.1 § 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    ///
    /// "The percentage is calculated with respect to the width of the
    /// generated box's containing block." Here it is the box's own width.
    #[must_use]
    pub fn actual_padding(&self, id: BoxId, side: Side) -> f32 {
        *self.node(id).computed.padding[side.index()].get_or_init(|| {
            parse_length(
                self.property(id, PADDING[side.index()]),
                self.size(id).width,
                self.em_height(id),
            )
        })
    }

    /// [CSS 2.1 § 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    ///
    /// `auto` resolves to 0.
    #[must_use]
    pub fn actual_margin(&self, id: BoxId, side: Side) -> f32 {
        *self.node(id).computed.margin[side.index()].get_or_init(|| {
            let value = self.property(id, MARGIN[side.index()]);
            if value == "auto" {
                return 0.0;
            }
            parse_length(value, self.size(id).width, self.em_height(id))
        })
    }

    /// [CSS 2.1 § 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    ///
    /// A side whose style is `none` (or empty) has no width, whatever its
    /// declared width.
    #[must_use]
    pub fn actual_border_width(&self, id: BoxId, side: Side) -> f32 {
        *self.node(id).computed.border_width[side.index()].get_or_init(|| {
            match self.property(id, BORDER_STYLE[side.index()]) {
                "" | "none" => 0.0,
                _ => border_width(
                    self.property(id, BORDER_WIDTH[side.index()]),
                    self.em_height(id),
                ),
            }
        })
    }

    /// The declared style of one border side.
    #[must_use]
    pub fn border_style(&self, id: BoxId, side: Side) -> &str {
        self.property(id, BORDER_STYLE[side.index()])
    }

    /// [CSS 2.1 § 8.5.2 Border color](https://www.w3.org/TR/CSS2/box.html#border-color-properties)
    #[must_use]
    pub fn actual_border_color(&self, id: BoxId, side: Side) -> Color {
        *self.node(id).computed.border_color[side.index()]
            .get_or_init(|| Color::parse(self.property(id, BORDER_COLOR[side.index()])))
    }

    /// Radius of one rounded corner.
    #[must_use]
    pub fn actual_corner_radius(&self, id: BoxId, corner: Corner) -> f32 {
        *self.node(id).computed.corner_radius[corner.index()].get_or_init(|| {
            parse_length(
                self.property(id, CORNER_RADIUS[corner.index()]),
                0.0,
                self.em_height(id),
            )
        })
    }

    /// [CSS 2.1 § 14.1 Foreground color](https://www.w3.org/TR/CSS2/colors.html#colors)
    #[must_use]
    pub fn actual_color(&self, id: BoxId) -> Color {
        *self
            .node(id)
            .computed
            .color
            .get_or_init(|| Color::parse(self.property(id, Property::Color)))
    }

    /// [CSS 2.1 § 14.2.1 Background properties](https://www.w3.org/TR/CSS2/colors.html#background-properties)
    #[must_use]
    pub fn actual_background_color(&self, id: BoxId) -> Color {
        *self
            .node(id)
            .computed
            .background_color
            .get_or_init(|| Color::parse(self.property(id, Property::BackgroundColor)))
    }

    /// End color of the background gradient; [`Color::EMPTY`] for `none`.
    #[must_use]
    pub fn actual_background_gradient(&self, id: BoxId) -> Color {
        *self
            .node(id)
            .computed
            .background_gradient
            .get_or_init(|| match self.property(id, Property::BackgroundGradient) {
                "none" => Color::EMPTY,
                value => Color::parse(value),
            })
    }

    /// Gradient angle in degrees. A percentage is taken of 360.
    #[must_use]
    pub fn actual_background_gradient_angle(&self, id: BoxId) -> f32 {
        *self.node(id).computed.gradient_angle.get_or_init(|| {
            parse_number(self.property(id, Property::BackgroundGradientAngle), 360.0)
        })
    }

    /// [CSS 2.1 § 16.1 Indentation](https://www.w3.org/TR/CSS2/text.html#indentation-prop)
    #[must_use]
    pub fn actual_text_indent(&self, id: BoxId) -> f32 {
        *self.node(id).computed.text_indent.get_or_init(|| {
            parse_length(
                self.property(id, Property::TextIndent),
                self.size(id).width,
                self.em_height(id),
            )
        })
    }

    /// [CSS 2.1 § 17.6.1 The separated borders model](https://www.w3.org/TR/CSS2/tables.html#separated-borders)
    ///
    /// "The lengths specify the distance that separates adjoining cell
    /// borders. If one length is specified, it gives both the horizontal and
    /// vertical spacing. If two are specified, the first gives the
    /// horizontal spacing and the second the vertical spacing."
    ///
    /// Returns `(horizontal, vertical)`.
    #[must_use]
    pub fn actual_border_spacing(&self, id: BoxId) -> (f32, f32) {
        *self.node(id).computed.border_spacing.get_or_init(|| {
            let em = self.em_height(id);
            let values = split_values(self.property(id, Property::BorderSpacing));
            match values.as_slice() {
                [] => (0.0, 0.0),
                [both] => {
                    let spacing = parse_length(both, 1.0, em);
                    (spacing, spacing)
                }
                [horizontal, vertical, ..] => (
                    parse_length(horizontal, 1.0, em),
                    parse_length(vertical, 1.0, em),
                ),
            }
        })
    }

    /// [CSS 2.1 § 15 Fonts](https://www.w3.org/TR/CSS2/fonts.html)
    ///
    /// The resolved font. Relative sizes resolve against the parent's
    /// resolved font, or against `medium` at the root.
    #[must_use]
    pub fn actual_font(&self, id: BoxId) -> Font {
        self.node(id)
            .computed
            .font
            .get_or_init(|| {
                let base = self.base_font_size();
                let parent_size = self.parent(id).map_or(base, |p| self.actual_font(p).size);
                Font {
                    family: self
                        .generic_families()
                        .primary_family(self.property(id, Property::FontFamily)),
                    size: font::resolve_font_size(
                        self.property(id, Property::FontSize),
                        parent_size,
                        base,
                    ),
                    bold: font::is_bold(self.property(id, Property::FontWeight)),
                    italic: font::is_italic(self.property(id, Property::FontStyle)),
                }
            })
            .clone()
    }

    /// Length of one `em` for this box, in pixels.
    #[must_use]
    pub fn em_height(&self, id: BoxId) -> f32 {
        self.actual_font(id).size_px()
    }

    /// All four paddings.
    #[must_use]
    pub fn padding(&self, id: BoxId) -> EdgeSizes {
        self.edges(id, Self::actual_padding)
    }

    /// All four border widths.
    #[must_use]
    pub fn border(&self, id: BoxId) -> EdgeSizes {
        self.edges(id, Self::actual_border_width)
    }

    /// All four margins.
    #[must_use]
    pub fn margin(&self, id: BoxId) -> EdgeSizes {
        self.edges(id, Self::actual_margin)
    }

    fn edges(&self, id: BoxId, side: fn(&Self, BoxId, Side) -> f32) -> EdgeSizes {
        EdgeSizes {
            top: side(self, id, Side::Top),
            right: side(self, id, Side::Right),
            bottom: side(self, id, Side::Bottom),
            left: side(self, id, Side::Left),
        }
    }

    /// The four corner radii in `[nw, ne, se, sw]` order.
    #[must_use]
    pub fn corner_radii(&self, id: BoxId) -> [f32; 4] {
        [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw].map(|c| self.actual_corner_radius(id, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxKind;

    fn child_of_root(tree: &mut BoxTree) -> BoxId {
        let id = tree.create_box(BoxKind::Normal, None);
        tree.append_child(tree.root(), id).unwrap();
        id
    }

    #[test]
    fn test_padding_percentage_of_own_width_is_memoized() {
        let mut tree = BoxTree::new();
        let b = child_of_root(&mut tree);
        tree.set_size(b, crate::box_model::Size::new(200.0, 0.0));
        tree.set_property(b, Property::PaddingLeft, "10%");
        assert!((tree.actual_padding(b, Side::Left) - 20.0).abs() < f32::EPSILON);

        tree.set_size(b, crate::box_model::Size::new(400.0, 0.0));
        assert!((tree.actual_padding(b, Side::Left) - 20.0).abs() < f32::EPSILON);

        tree.set_property(b, Property::PaddingRight, "0");
        assert!((tree.actual_padding(b, Side::Left) - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_border_without_style_has_no_width() {
        let mut tree = BoxTree::new();
        let b = child_of_root(&mut tree);
        tree.set_property(b, Property::BorderTopWidth, "5px");
        assert!(tree.actual_border_width(b, Side::Top).abs() < f32::EPSILON);
        tree.set_property(b, Property::BorderTopStyle, "solid");
        assert!((tree.actual_border_width(b, Side::Top) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_border_spacing_pair() {
        let mut tree = BoxTree::new();
        let b = child_of_root(&mut tree);
        tree.set_property(b, Property::BorderSpacing, "2px 4px");
        assert_eq!(tree.actual_border_spacing(b), (2.0, 4.0));
    }

    #[test]
    fn test_font_size_change_reaches_descendants() {
        let mut tree = BoxTree::new();
        let parent = child_of_root(&mut tree);
        let child = tree.create_box(BoxKind::Normal, None);
        tree.append_child(parent, child).unwrap();
        tree.set_property(child, Property::FontSize, "larger");
        assert!((tree.actual_font(child).size - 14.0).abs() < f32::EPSILON);

        tree.set_property(parent, Property::FontSize, "20pt");
        assert!((tree.actual_font(child).size - 22.0).abs() < f32::EPSILON);
    }
}
