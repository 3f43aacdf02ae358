//! CSS color values.
//!
//! [CSS 2.1 § 4.3.6 Colors](https://www.w3.org/TR/CSS2/syndata.html#color-units)

use serde::Serialize;
use wren_common::warning::{Component, warn_once};

use super::parse_number;

/// An sRGB color. [`Color::EMPTY`] is the result of an unrecognized value
/// and is distinct from black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 for every parsed color, 0 for [`Color::EMPTY`].
    pub a: u8,
}

/// [CSS 2.1 § 4.3.6](https://www.w3.org/TR/CSS2/syndata.html#color-units)
///
/// "The list of keyword color names is: aqua, black, blue, fuchsia, gray,
/// green, lime, maroon, navy, olive, orange, purple, red, silver, teal,
/// white, and yellow."
const NAMED_COLORS: [(&str, [u8; 3]); 17] = [
    ("maroon", [0x80, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("purple", [0x80, 0x00, 0x80]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("white", [0xff, 0xff, 0xff]),
    ("lime", [0x00, 0xff, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("navy", [0x00, 0x00, 0x80]),
    ("blue", [0x00, 0x00, 0xff]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("black", [0x00, 0x00, 0x00]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("gray", [0x80, 0x80, 0x80]),
    ("yellow", [0xff, 0xff, 0x00]),
];

impl Color {
    /// The "no color" sentinel.
    pub const EMPTY: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether this is the [`Color::EMPTY`] sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a == 0
    }

    /// Resolve a color value. Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` with
    /// numbers or percentages of 255, and the named colors.
    ///
    /// Returns [`Color::EMPTY`] for anything else. An empty string and
    /// `transparent` are silently empty; other unrecognized text is
    /// reported once.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let value = text.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
            return Self::EMPTY;
        }

        Self::try_parse(value).unwrap_or_else(|| {
            warn_once(Component::Css, &format!("unrecognized color '{text}'"));
            Self::EMPTY
        })
    }

    /// Like [`Color::parse`], but `None` for anything unrecognized and
    /// without reporting it. Used to classify the pieces of a shorthand.
    #[must_use]
    pub fn try_parse(text: &str) -> Option<Self> {
        let value = text.trim().to_ascii_lowercase();

        if let Some(hex) = value.strip_prefix('#') {
            Self::from_hex(hex)
        } else if let Some(args) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::from_rgb_function(args)
        } else {
            NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == value)
                .map(|&(_, [r, g, b])| Self::rgb(r, g, b))
        }
    }

    /// "The three-digit RGB notation (#rgb) is converted into six-digit form
    /// (#rrggbb) by replicating digits, not by adding zeros."
    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }

    /// "The format of an RGB value in the functional notation is 'rgb('
    /// followed by a comma-separated list of three numerical values (either
    /// three integer values or three percentage values) followed by ')'."
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_rgb_function(args: &str) -> Option<Self> {
        let channels: Vec<u8> = args
            .split(',')
            .map(|chunk| parse_number(chunk.trim(), 255.0).round().clamp(0.0, 255.0) as u8)
            .collect();
        match channels.as_slice() {
            &[r, g, b] => Some(Self::rgb(r, g, b)),
            _ => None,
        }
    }

    /// The color used for the shaded sides of `inset` and `outset` borders.
    #[must_use]
    pub const fn darken(&self) -> Self {
        Self {
            r: self.r / 2,
            g: self.g / 2,
            b: self.b / 2,
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_short_form_replicates_digits() {
        assert_eq!(Color::parse("#f80"), Color::rgb(0xff, 0x88, 0x00));
    }

    #[test]
    fn test_bad_hex_digits() {
        assert!(Color::parse("#ggg").is_empty());
        assert!(Color::parse("#12345").is_empty());
    }

    #[test]
    fn test_darken_halves_channels() {
        assert_eq!(Color::rgb(200, 100, 50).darken(), Color::rgb(100, 50, 25));
    }
}
