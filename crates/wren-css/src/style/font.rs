//! Font selection.
//!
//! [CSS 2.1 § 15 Fonts](https://www.w3.org/TR/CSS2/fonts.html)
//!
//! Font sizes are carried in points; `em` sizes are rewritten to points
//! against the parent's size as soon as they are assigned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::values::{PX_PER_POINT, parse_length_points};

/// Size of `font-size: medium`, in points.
pub const DEFAULT_FONT_SIZE_PT: f32 = 12.0;

/// A resolved font.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    /// Concrete family name.
    pub family: String,
    /// Size in points.
    pub size: f32,
    /// `font-weight` other than `normal`/`lighter`.
    pub bold: bool,
    /// `font-style: italic` or `oblique`.
    pub italic: bool,
}

impl Font {
    /// Size in CSS pixels.
    #[must_use]
    pub fn size_px(&self) -> f32 {
        self.size * PX_PER_POINT
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size: DEFAULT_FONT_SIZE_PT,
            bold: false,
            italic: false,
        }
    }
}

/// [CSS 2.1 § 15.3 Font family](https://www.w3.org/TR/CSS2/fonts.html#generic-font-families)
///
/// "Generic font families are a fallback mechanism, a means of preserving
/// some of the style sheet author's intent in the worst case when none of
/// the specified fonts can be selected."
///
/// Maps each generic keyword to the concrete family used in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericFamilies(BTreeMap<String, String>);

impl Default for GenericFamilies {
    fn default() -> Self {
        Self(BTreeMap::from([
            ("serif".to_string(), "Times New Roman".to_string()),
            ("sans-serif".to_string(), "Arial".to_string()),
            ("monospace".to_string(), "Courier New".to_string()),
            ("cursive".to_string(), "Comic Sans MS".to_string()),
            ("fantasy".to_string(), "Impact".to_string()),
        ]))
    }
}

impl GenericFamilies {
    /// Override or add the family used for `keyword`.
    pub fn set(&mut self, keyword: &str, family: &str) {
        let _ = self.0.insert(keyword.to_string(), family.to_string());
    }

    /// The concrete family for a generic keyword, if `name` is one.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The first family of a `font-family` list, unquoted, with generic
    /// keywords replaced.
    #[must_use]
    pub fn primary_family(&self, list: &str) -> String {
        let first = list.split(',').next().unwrap_or("").trim();
        let first = first.trim_matches(|c| c == '"' || c == '\'');
        self.resolve(first).unwrap_or(first).to_string()
    }
}

/// [CSS 2.1 § 15.7 Font size](https://www.w3.org/TR/CSS2/fonts.html#font-size-props)
///
/// Resolve a declared `font-size` to points.
///
/// "An `<absolute-size>` keyword is an index to a table of font sizes
/// computed and kept by the UA." Here `small` and `large` are 2pt away
/// from `medium`'s `base` size and every further step adds 1pt.
///
/// "A `<relative-size>` keyword is interpreted relative to the table of
/// font sizes and the font size of the parent element." `smaller` and
/// `larger` are 2pt away from `parent`.
///
/// Lengths resolve against `parent`. A result of 1pt or less falls back
/// to `base`.
#[must_use]
pub fn resolve_font_size(font_size: &str, parent: f32, base: f32) -> f32 {
    let size = match font_size {
        "medium" => base,
        "xx-small" => base - 4.0,
        "x-small" => base - 3.0,
        "small" => base - 2.0,
        "large" => base + 2.0,
        "x-large" => base + 3.0,
        "xx-large" => base + 4.0,
        "smaller" => parent - 2.0,
        "larger" => parent + 2.0,
        other => parse_length_points(other, parent, parent),
    };

    if size <= 1.0 { base } else { size }
}

/// [CSS 2.1 § 15.7 Font styling](https://www.w3.org/TR/CSS2/fonts.html#font-styling)
#[must_use]
pub fn is_italic(font_style: &str) -> bool {
    matches!(font_style, "italic" | "oblique")
}

/// [CSS 2.1 § 15.6 Font boldness](https://www.w3.org/TR/CSS2/fonts.html#font-boldness)
///
/// Anything heavier than `normal` is drawn bold.
#[must_use]
pub fn is_bold(font_weight: &str) -> bool {
    !matches!(font_weight, "" | "normal" | "lighter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_sizes() {
        assert!((resolve_font_size("medium", 20.0, 12.0) - 12.0).abs() < f32::EPSILON);
        assert!((resolve_font_size("xx-large", 20.0, 12.0) - 16.0).abs() < f32::EPSILON);
        assert!((resolve_font_size("smaller", 20.0, 12.0) - 18.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_size_falls_back() {
        assert!((resolve_font_size("0pt", 12.0, 12.0) - 12.0).abs() < f32::EPSILON);
        assert!((resolve_font_size("bogus", 12.0, 12.0) - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_primary_family() {
        let g = GenericFamilies::default();
        assert_eq!(g.primary_family("'Helvetica Neue', Arial"), "Helvetica Neue");
        assert_eq!(g.primary_family("monospace"), "Courier New");
    }
}
