//! Resolution of CSS literal strings into numbers and colors.
//!
//! Every function here is total: malformed input resolves to a documented
//! fallback (zero, or [`Color::EMPTY`]) and the caller decides whether that
//! matters.

/// Color parsing.
pub mod color;
/// The length literal model.
pub mod length;

pub use color::Color;
pub use length::{Length, LengthUnit, translate_length};

use wren_common::warning::{Component, warn_once};

/// CSS pixels per inch.
pub const PX_PER_INCH: f32 = 96.0;

/// CSS pixels per point (1pt = 1/72in).
pub const PX_PER_POINT: f32 = PX_PER_INCH / 72.0;

/// Parse a number or a percentage.
///
/// A percentage is taken of `hundred_percent`. Unparsable input gives 0.
///
/// ```ignore
/// assert_eq!(parse_number("50%", 200.0), 100.0);
/// assert_eq!(parse_number("2.5", 0.0), 2.5);
/// ```
#[must_use]
pub fn parse_number(number: &str, hundred_percent: f32) -> f32 {
    if number.is_empty() {
        return 0.0;
    }

    let (to_parse, is_percent) = match number.strip_suffix('%') {
        Some(n) => (n, true),
        None => (number, false),
    };

    let Ok(result) = to_parse.trim().parse::<f32>() else {
        return 0.0;
    };
    if !result.is_finite() {
        return 0.0;
    }

    if is_percent {
        result / 100.0 * hundred_percent
    } else {
        result
    }
}

/// [CSS 2.1 § 4.3.2 Lengths](https://www.w3.org/TR/CSS2/syndata.html#length-units)
///
/// Resolve a length to pixels.
///
/// - `""` and `"0"` resolve to 0
/// - percentages are taken of `hundred_percent`
/// - `em` is multiplied by `em_factor`
/// - absolute units use 96px/in, 37px/cm, 3px/mm, 96/72px/pt and 12pt/pc
/// - unit-less or unknown-unit literals resolve to 0
#[must_use]
pub fn parse_length(length: &str, hundred_percent: f32, em_factor: f32) -> f32 {
    resolve_length(length, hundred_percent, em_factor, false)
}

/// Like [`parse_length`], but a `pt` length is returned in points rather
/// than pixels. Used for font sizes, which are kept in points.
#[must_use]
pub fn parse_length_points(length: &str, hundred_percent: f32, em_factor: f32) -> f32 {
    resolve_length(length, hundred_percent, em_factor, true)
}

fn resolve_length(length: &str, hundred_percent: f32, em_factor: f32, want_points: bool) -> f32 {
    if length.is_empty() || length == "0" {
        return 0.0;
    }

    if length.ends_with('%') {
        return parse_number(length, hundred_percent);
    }

    if length.len() < 3 || !length.is_char_boundary(length.len() - 2) {
        return 0.0;
    }

    let (number, unit) = length.split_at(length.len() - 2);

    let factor = match unit.parse::<LengthUnit>() {
        Ok(LengthUnit::Em) => em_factor,
        Ok(LengthUnit::Px) => 1.0,
        // Device-independent approximations
        Ok(LengthUnit::Mm) => 3.0,
        Ok(LengthUnit::Cm) => 37.0,
        Ok(LengthUnit::In) => PX_PER_INCH,
        Ok(LengthUnit::Pt) if want_points => return parse_number(number, hundred_percent),
        Ok(LengthUnit::Pt) => PX_PER_POINT,
        Ok(LengthUnit::Pc) => PX_PER_POINT * 12.0,
        Ok(LengthUnit::Ex | LengthUnit::None) | Err(_) => {
            if number.trim().parse::<f32>().is_ok() {
                warn_once(
                    Component::Css,
                    &format!("unsupported length unit in '{length}'"),
                );
            }
            0.0
        }
    };

    factor * parse_number(number, hundred_percent)
}

/// [CSS 2.1 § 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
///
/// "thin, medium, thick: The interpretation of the first three values
/// depends on the user agent."
///
/// Here they are 1px, 2px and 4px. An empty value is `medium`. Lengths
/// resolve with `em_factor` and are never negative.
#[must_use]
pub fn border_width(value: &str, em_factor: f32) -> f32 {
    match value {
        "" | "medium" => 2.0,
        "thin" => 1.0,
        "thick" => 4.0,
        _ => parse_length(value, 1.0, em_factor).abs(),
    }
}

/// Split a space-separated property value, dropping empty pieces.
///
/// Spaces inside parentheses do not split, so `rgb(0, 0, 0) red` is two
/// values.
#[must_use]
pub fn split_values(value: &str) -> Vec<&str> {
    let mut values = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                values.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    values.push(&value[start..]);
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}
