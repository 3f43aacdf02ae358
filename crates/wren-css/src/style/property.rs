//! The static property table.
//!
//! Every CSS property the engine understands has one [`Property`] variant
//! and one row in [`PROPERTY_TABLE`]: its CSS name, the declared value a new
//! box starts with, and whether the cascade copies it from the parent.
//!
//! Shorthands (`margin`, `border-top`, `font`, ...) are properties too.
//! Their declared value is kept as written; assigning one also writes the
//! longhands it expands to (see [`super::shorthand`]).

use serde::Serialize;
use strum_macros::{AsRefStr, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A CSS property name.
///
/// Parses from and displays as the hyphenated CSS name:
///
/// ```ignore
/// assert_eq!("border-top-width".parse(), Ok(Property::BorderTopWidth));
/// assert_eq!(Property::CornerNwRadius.as_ref(), "corner-nw-radius");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Property {
    // Borders
    BorderBottomWidth,
    BorderLeftWidth,
    BorderRightWidth,
    BorderTopWidth,
    BorderBottomStyle,
    BorderLeftStyle,
    BorderRightStyle,
    BorderTopStyle,
    BorderBottomColor,
    BorderLeftColor,
    BorderRightColor,
    BorderTopColor,
    BorderSpacing,
    BorderCollapse,
    CornerRadius,
    CornerNwRadius,
    CornerNeRadius,
    CornerSeRadius,
    CornerSwRadius,
    // Box edges
    MarginBottom,
    MarginLeft,
    MarginRight,
    MarginTop,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    // Position and size
    Left,
    Top,
    Width,
    Height,
    // Background
    BackgroundColor,
    BackgroundImage,
    BackgroundRepeat,
    BackgroundGradient,
    BackgroundGradientAngle,
    // Visual formatting
    Color,
    Display,
    Direction,
    EmptyCells,
    Float,
    Position,
    // Text
    LineHeight,
    VerticalAlign,
    TextIndent,
    TextAlign,
    TextDecoration,
    WhiteSpace,
    WordSpacing,
    // Fonts
    Font,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariant,
    FontWeight,
    // Lists
    ListStyle,
    ListStylePosition,
    ListStyleImage,
    ListStyleType,
    // Shorthands
    Border,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BorderWidth,
    BorderStyle,
    BorderColor,
    Margin,
    Padding,
}

/// One row of the property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    /// The property this row describes.
    pub property: Property,
    /// Declared value of a freshly created box.
    pub default: &'static str,
    /// Whether the cascade copies the parent's declared value.
    pub inherited: bool,
}

const fn def(property: Property, default: &'static str, inherited: bool) -> PropertyDef {
    PropertyDef {
        property,
        default,
        inherited,
    }
}

/// Defaults and inheritance for every property, in [`Property`] order.
pub static PROPERTY_TABLE: [PropertyDef; <Property as strum::EnumCount>::COUNT] = [
    def(Property::BorderBottomWidth, "medium", false),
    def(Property::BorderLeftWidth, "medium", false),
    def(Property::BorderRightWidth, "medium", false),
    def(Property::BorderTopWidth, "medium", false),
    def(Property::BorderBottomStyle, "none", false),
    def(Property::BorderLeftStyle, "none", false),
    def(Property::BorderRightStyle, "none", false),
    def(Property::BorderTopStyle, "none", false),
    def(Property::BorderBottomColor, "black", false),
    def(Property::BorderLeftColor, "black", false),
    def(Property::BorderRightColor, "black", false),
    def(Property::BorderTopColor, "black", false),
    def(Property::BorderSpacing, "0", true),
    def(Property::BorderCollapse, "separate", true),
    def(Property::CornerRadius, "0", false),
    def(Property::CornerNwRadius, "0", false),
    def(Property::CornerNeRadius, "0", false),
    def(Property::CornerSeRadius, "0", false),
    def(Property::CornerSwRadius, "0", false),
    def(Property::MarginBottom, "0", false),
    def(Property::MarginLeft, "0", false),
    def(Property::MarginRight, "0", false),
    def(Property::MarginTop, "0", false),
    def(Property::PaddingBottom, "0", false),
    def(Property::PaddingLeft, "0", false),
    def(Property::PaddingRight, "0", false),
    def(Property::PaddingTop, "0", false),
    def(Property::Left, "auto", false),
    def(Property::Top, "auto", false),
    def(Property::Width, "auto", false),
    def(Property::Height, "auto", false),
    def(Property::BackgroundColor, "transparent", false),
    def(Property::BackgroundImage, "none", false),
    def(Property::BackgroundRepeat, "repeat", false),
    def(Property::BackgroundGradient, "none", false),
    def(Property::BackgroundGradientAngle, "90", false),
    def(Property::Color, "black", true),
    def(Property::Display, "inline", false),
    def(Property::Direction, "ltr", false),
    def(Property::EmptyCells, "show", true),
    def(Property::Float, "none", false),
    def(Property::Position, "static", false),
    def(Property::LineHeight, "normal", false),
    def(Property::VerticalAlign, "baseline", true),
    def(Property::TextIndent, "0", true),
    def(Property::TextAlign, "", true),
    def(Property::TextDecoration, "", false),
    def(Property::WhiteSpace, "normal", true),
    def(Property::WordSpacing, "normal", false),
    def(Property::Font, "", true),
    def(Property::FontFamily, "serif", true),
    def(Property::FontSize, "medium", true),
    def(Property::FontStyle, "normal", true),
    def(Property::FontVariant, "normal", true),
    def(Property::FontWeight, "normal", true),
    def(Property::ListStyle, "", true),
    def(Property::ListStylePosition, "outside", true),
    def(Property::ListStyleImage, "", true),
    def(Property::ListStyleType, "disc", true),
    def(Property::Border, "", false),
    def(Property::BorderTop, "", false),
    def(Property::BorderRight, "", false),
    def(Property::BorderBottom, "", false),
    def(Property::BorderLeft, "", false),
    def(Property::BorderWidth, "", false),
    def(Property::BorderStyle, "", false),
    def(Property::BorderColor, "", false),
    def(Property::Margin, "", false),
    def(Property::Padding, "", false),
];

impl Property {
    /// Number of properties.
    pub const COUNT: usize = <Self as strum::EnumCount>::COUNT;

    /// Position in [`PROPERTY_TABLE`] and in a box's declared values.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// This property's table row.
    #[must_use]
    pub fn def(self) -> &'static PropertyDef {
        &PROPERTY_TABLE[self.index()]
    }

    /// The declared value of a freshly created box.
    #[must_use]
    pub fn default_value(self) -> &'static str {
        self.def().default
    }

    /// Whether the cascade copies this property from the parent.
    #[must_use]
    pub fn is_inherited(self) -> bool {
        self.def().inherited
    }

    /// Look up a property by CSS name; `None` for names the engine ignores.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// The CSS name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Iterate over the inherited properties in table order.
    pub fn inherited() -> impl Iterator<Item = Self> {
        PROPERTY_TABLE
            .iter()
            .filter(|d| d.inherited)
            .map(|d| d.property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_rows_match_enum_order() {
        for (i, p) in Property::iter().enumerate() {
            assert_eq!(PROPERTY_TABLE[i].property, p, "row {i}");
        }
    }

    #[test]
    fn test_names_round_trip() {
        for p in Property::iter() {
            assert_eq!(Property::from_name(p.name()), Some(p));
        }
        assert_eq!(Property::CornerNwRadius.name(), "corner-nw-radius");
        assert_eq!(Property::BackgroundGradientAngle.name(), "background-gradient-angle");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Property::from_name("z-index"), None);
    }
}
