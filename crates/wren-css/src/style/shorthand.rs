//! Shorthand property expansion.
//!
//! [CSS 2.1 § 1.4.3 Shorthand properties](https://www.w3.org/TR/CSS2/about.html#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property."
//!
//! [`expand`] maps one shorthand assignment onto the longhand assignments it
//! implies. The result may itself contain shorthands (`border` yields
//! `border-width`), which the caller expands again when assigning.

use super::Property;
use crate::values::{Color, split_values};

/// Top, right, bottom, left.
type Sides = [Property; 4];

const MARGIN_SIDES: Sides = [
    Property::MarginTop,
    Property::MarginRight,
    Property::MarginBottom,
    Property::MarginLeft,
];

const PADDING_SIDES: Sides = [
    Property::PaddingTop,
    Property::PaddingRight,
    Property::PaddingBottom,
    Property::PaddingLeft,
];

const BORDER_WIDTH_SIDES: Sides = [
    Property::BorderTopWidth,
    Property::BorderRightWidth,
    Property::BorderBottomWidth,
    Property::BorderLeftWidth,
];

const BORDER_STYLE_SIDES: Sides = [
    Property::BorderTopStyle,
    Property::BorderRightStyle,
    Property::BorderBottomStyle,
    Property::BorderLeftStyle,
];

const BORDER_COLOR_SIDES: Sides = [
    Property::BorderTopColor,
    Property::BorderRightColor,
    Property::BorderBottomColor,
    Property::BorderLeftColor,
];

/// [CSS 2.1 § 8.5.3 Border style](https://www.w3.org/TR/CSS2/box.html#border-style-properties)
const BORDER_STYLES: [&str; 10] = [
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

const FONT_SIZE_KEYWORDS: [&str; 9] = [
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller", "larger",
];

/// The longhand assignments implied by assigning `value` to `property`.
///
/// Empty for longhands and for shorthand values that do not fit the
/// grammar (e.g. five box-edge values).
#[must_use]
pub fn expand(property: Property, value: &str) -> Vec<(Property, String)> {
    match property {
        Property::Margin => box_edges(MARGIN_SIDES, value),
        Property::Padding => box_edges(PADDING_SIDES, value),
        Property::BorderWidth => box_edges(BORDER_WIDTH_SIDES, value),
        Property::BorderStyle => box_edges(BORDER_STYLE_SIDES, value),
        Property::BorderColor => box_edges(BORDER_COLOR_SIDES, value),
        Property::CornerRadius => corner_radius(value),
        Property::Border => border(
            value,
            [
                Property::BorderWidth,
                Property::BorderStyle,
                Property::BorderColor,
            ],
        ),
        Property::BorderTop => border_side(value, 0),
        Property::BorderRight => border_side(value, 1),
        Property::BorderBottom => border_side(value, 2),
        Property::BorderLeft => border_side(value, 3),
        Property::Font => font(value),
        _ => Vec::new(),
    }
}

/// [CSS 2.1 § 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom margins are set to the first value
/// and the right and left margins are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four
/// values, they apply to the top, right, bottom, and left, respectively."
fn box_edges([top, right, bottom, left]: Sides, value: &str) -> Vec<(Property, String)> {
    let values = split_values(value);
    let (t, r, b, l) = match values.as_slice() {
        &[all] => (all, all, all, all),
        &[vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
        &[t, horizontal, b] => (t, horizontal, b, horizontal),
        &[t, r, b, l] => (t, r, b, l),
        _ => return Vec::new(),
    };
    vec![
        (top, t.to_string()),
        (right, r.to_string()),
        (bottom, b.to_string()),
        (left, l.to_string()),
    ]
}

/// Distribute `corner-radius` over the four corners.
///
/// One value sets every corner. Two values set the top corners from the
/// first and the bottom corners from the second. Three values set
/// north-east, north-west and south-east, leaving south-west alone. Four
/// values set north-east, north-west, south-east and south-west.
fn corner_radius(value: &str) -> Vec<(Property, String)> {
    let values = split_values(value);
    let assign = |p: Property, v: &str| (p, v.to_string());
    match values.as_slice() {
        &[all] => vec![
            assign(Property::CornerNeRadius, all),
            assign(Property::CornerNwRadius, all),
            assign(Property::CornerSeRadius, all),
            assign(Property::CornerSwRadius, all),
        ],
        &[top, bottom] => vec![
            assign(Property::CornerNeRadius, top),
            assign(Property::CornerNwRadius, top),
            assign(Property::CornerSeRadius, bottom),
            assign(Property::CornerSwRadius, bottom),
        ],
        &[ne, nw, se] => vec![
            assign(Property::CornerNeRadius, ne),
            assign(Property::CornerNwRadius, nw),
            assign(Property::CornerSeRadius, se),
        ],
        &[ne, nw, se, sw] => vec![
            assign(Property::CornerNeRadius, ne),
            assign(Property::CornerNwRadius, nw),
            assign(Property::CornerSeRadius, se),
            assign(Property::CornerSwRadius, sw),
        ],
        _ => Vec::new(),
    }
}

fn border_side(value: &str, side: usize) -> Vec<(Property, String)> {
    border(
        value,
        [
            BORDER_WIDTH_SIDES[side],
            BORDER_STYLE_SIDES[side],
            BORDER_COLOR_SIDES[side],
        ],
    )
}

/// [CSS 2.1 § 8.5.4 Border shorthand properties](https://www.w3.org/TR/CSS2/box.html#border-shorthand-properties)
///
/// "'border-top' ... [ `<border-width>` || `<border-style>` || `<color>` ]"
///
/// Each component is looked up by what it looks like, in any order; the
/// first match of each kind wins and missing kinds are left alone.
fn border(value: &str, [width, style, color]: [Property; 3]) -> Vec<(Property, String)> {
    let mut found_width = None;
    let mut found_style = None;
    let mut found_color = None;

    for token in split_values(value) {
        if found_width.is_none() && is_border_width(token) {
            found_width = Some(token);
        } else if found_style.is_none() && BORDER_STYLES.contains(&token) {
            found_style = Some(token);
        } else if found_color.is_none() && Color::try_parse(token).is_some() {
            found_color = Some(token);
        }
    }

    [(width, found_width), (style, found_style), (color, found_color)]
        .into_iter()
        .filter_map(|(p, v)| v.map(|v| (p, v.to_string())))
        .collect()
}

fn is_border_width(token: &str) -> bool {
    matches!(token, "thin" | "medium" | "thick") || starts_numeric(token)
}

fn starts_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// [CSS 2.1 § 15.8 Shorthand font property](https://www.w3.org/TR/CSS2/fonts.html#font-shorthand)
///
/// "[ [ 'font-style' || 'font-variant' || 'font-weight' ]? 'font-size'
/// [ / 'line-height' ]? 'font-family' ]"
///
/// The size token anchors the parse: style, variant and weight are taken
/// from the text to its left, the family is everything to its right. A
/// value without a recognizable size sets nothing.
fn font(value: &str) -> Vec<(Property, String)> {
    let Some((start, size_token)) = find_font_size(value) else {
        return Vec::new();
    };

    let mut assignments = Vec::new();

    for token in split_values(&value[..start]) {
        let property = match token {
            "italic" | "oblique" => Property::FontStyle,
            "small-caps" => Property::FontVariant,
            "bold" | "bolder" | "lighter" => Property::FontWeight,
            t if t.len() == 3 && t.ends_with("00") && starts_numeric(t) => Property::FontWeight,
            _ => continue,
        };
        if !assignments.iter().any(|(p, _)| *p == property) {
            assignments.push((property, token.to_string()));
        }
    }

    let family = value[start + size_token.len()..].trim();
    if !family.is_empty() {
        assignments.push((Property::FontFamily, family.to_string()));
    }

    // "12px/14px": split only when something follows the slash.
    match size_token.split_once('/') {
        Some((size, line_height)) if !line_height.is_empty() => {
            assignments.push((Property::FontSize, size.to_string()));
            assignments.push((Property::LineHeight, line_height.to_string()));
        }
        _ => assignments.push((Property::FontSize, size_token.to_string())),
    }

    assignments
}

/// Byte offset and text of the first `size[/line-height]` token.
fn find_font_size(value: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    for token in value.split(' ') {
        let size_part = token.split('/').next().unwrap_or(token);
        let is_size = FONT_SIZE_KEYWORDS.contains(&size_part)
            || (starts_numeric(size_part) && !(size_part.len() == 3 && size_part.ends_with("00")));
        if !token.is_empty() && is_size {
            return Some((offset, token));
        }
        offset += token.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(assignments: &[(Property, String)], p: Property) -> Option<&str> {
        assignments
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_five_values_ignored() {
        assert!(expand(Property::Margin, "1px 2px 3px 4px 5px").is_empty());
    }

    #[test]
    fn test_corner_three_values_skip_south_west() {
        let a = expand(Property::CornerRadius, "1px 2px 3px");
        assert_eq!(lookup(&a, Property::CornerNeRadius), Some("1px"));
        assert_eq!(lookup(&a, Property::CornerNwRadius), Some("2px"));
        assert_eq!(lookup(&a, Property::CornerSeRadius), Some("3px"));
        assert_eq!(lookup(&a, Property::CornerSwRadius), None);
    }

    #[test]
    fn test_font_weight_number_is_not_size() {
        let a = expand(Property::Font, "700 14px Arial");
        assert_eq!(lookup(&a, Property::FontWeight), Some("700"));
        assert_eq!(lookup(&a, Property::FontSize), Some("14px"));
        assert_eq!(lookup(&a, Property::FontFamily), Some("Arial"));
    }

    #[test]
    fn test_font_trailing_slash_kept_whole() {
        let a = expand(Property::Font, "12px/ serif");
        assert_eq!(lookup(&a, Property::FontSize), Some("12px/"));
        assert_eq!(lookup(&a, Property::LineHeight), None);
    }
}
