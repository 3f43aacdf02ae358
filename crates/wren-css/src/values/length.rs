//! CSS length values as written in a declaration.
//!
//! [CSS 2.1 § 4.3.2 Lengths](https://www.w3.org/TR/CSS2/syndata.html#length-units)
//!
//! "The format of a length value is a `<number>` (with or without a decimal
//! point) immediately followed by a unit identifier (e.g., px, em, etc.)."
//!
//! [`Length`] keeps the parsed pieces of the literal (number, unit,
//! percentage flag) and whether it was malformed. Resolution to pixels lives
//! in [`super::parse_length`]; this type answers questions about the literal
//! itself, such as "is this a pixel width" or "does this HTML attribute need
//! a unit appended".

use std::fmt;

use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};

use super::parse_number;

/// [CSS 2.1 § 4.3.2](https://www.w3.org/TR/CSS2/syndata.html#length-units)
///
/// Units recognized at the end of a length literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LengthUnit {
    /// No unit: a bare number, a percentage, zero, or a malformed literal.
    #[default]
    #[strum(serialize = "")]
    None,
    /// "the 'font-size' of the relevant font"
    Em,
    /// "the 'x-height' of the relevant font"
    Ex,
    /// "pixel units; 1px is equal to 0.75pt"
    Px,
    /// "millimeters"
    Mm,
    /// "centimeters"
    Cm,
    /// "inches; 1in is equal to 2.54cm"
    In,
    /// "points; the points used by CSS are equal to 1/72nd of 1in"
    Pt,
    /// "picas; 1pc is equal to 12pt"
    Pc,
}

/// A parsed length literal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Length {
    number: f32,
    unit: LengthUnit,
    percentage: bool,
    error: bool,
}

impl Length {
    /// Parse a length literal.
    ///
    /// - `""` and `"0"` are a valid zero with no unit
    /// - `"N%"` is a percentage
    /// - anything shorter than three characters has no room for a unit and
    ///   is flagged as an error, though its number is still read (`"20"`
    ///   has number 20)
    /// - an unknown two-letter suffix is an error with number 0
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut length = Self::default();

        if text.is_empty() || text == "0" {
            return length;
        }

        if text.ends_with('%') {
            length.number = parse_number(text, 1.0);
            length.percentage = true;
            return length;
        }

        if text.len() < 3 || !text.is_char_boundary(text.len() - 2) {
            length.number = text.trim().parse().unwrap_or(0.0);
            length.error = true;
            return length;
        }

        let (number, unit) = text.split_at(text.len() - 2);
        match unit.parse::<LengthUnit>() {
            Ok(unit) if unit != LengthUnit::None => length.unit = unit,
            _ => {
                length.error = true;
                return length;
            }
        }

        match number.trim().parse::<f32>() {
            Ok(n) if n.is_finite() => length.number = n,
            _ => length.error = true,
        }
        length
    }

    /// The numeric part. For percentages this is the percentage itself
    /// (`"50%"` gives 50).
    #[must_use]
    pub const fn number(&self) -> f32 {
        self.number
    }

    /// The unit suffix.
    #[must_use]
    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// True for `"N%"`.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        self.percentage
    }

    /// True if the literal could not be parsed as a length with a unit.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error
    }

    /// True for units whose size depends on the font or device
    /// (`em`, `ex`, `px`).
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        matches!(self.unit, LengthUnit::Em | LengthUnit::Ex | LengthUnit::Px)
    }

    /// Rewrite an `em` length as points, one decimal place.
    ///
    /// Returns `None` unless this is a valid `em` length.
    #[must_use]
    pub fn convert_em_to_points(&self, em_size: f32) -> Option<Self> {
        self.convert_em(em_size, "pt")
    }

    /// Rewrite an `em` length as pixels, one decimal place.
    ///
    /// Returns `None` unless this is a valid `em` length.
    #[must_use]
    pub fn convert_em_to_pixels(&self, pixel_factor: f32) -> Option<Self> {
        self.convert_em(pixel_factor, "px")
    }

    fn convert_em(&self, factor: f32, unit: &str) -> Option<Self> {
        if self.error || self.unit != LengthUnit::Em {
            return None;
        }
        Some(Self::parse(&format!("{:.1}{unit}", self.number * factor)))
    }
}

impl fmt::Display for Length {
    /// The literal in canonical form; empty for a malformed length.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error {
            Ok(())
        } else if self.percentage {
            write!(f, "{}%", self.number)
        } else {
            write!(f, "{}{}", self.number, self.unit.as_ref())
        }
    }
}

/// Convert an HTML attribute length into a CSS one.
///
/// HTML allows unit-less pixel counts (`width=100`); CSS does not. A literal
/// that does not parse as a CSS length gets `px` appended, everything else
/// passes through.
#[must_use]
pub fn translate_length(html_length: &str) -> String {
    if Length::parse(html_length).has_error() {
        format!("{html_length}px")
    } else {
        html_length.to_string()
    }
}
