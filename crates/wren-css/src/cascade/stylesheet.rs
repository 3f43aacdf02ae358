//! Style sheet ingestion.
//!
//! [CSS 2.1 § 4.1.7 Rule sets, declaration blocks, and selectors](https://www.w3.org/TR/CSS2/syndata.html#rule-sets)
//!
//! A [`StyleSheet`] maps a media type to a map of selectors to declaration
//! blocks. Only the selectors the cascade can match are meaningful: a tag
//! name (`p`) or a class (`.note`). Anything else is stored but never
//! matched.
//!
//! Feeding more text into a sheet merges it into what is there: a selector
//! seen again keeps its block, and the new declarations overwrite or extend
//! it property by property.

use std::collections::BTreeMap;

use wren_common::warning::{Component, warn_once};

use crate::boxes::{BoxId, BoxTree};

/// Media key of rules written outside any `@media` block.
pub const ALL_MEDIA: &str = "all";

/// [CSS 2.1 § 4.1.8 Declarations and properties](https://www.w3.org/TR/CSS2/syndata.html#declaration)
///
/// An ordered list of `property: value` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBlock {
    declarations: Vec<(String, String)>,
}

impl DeclarationBlock {
    /// Parse the inside of a block: `color: red; margin: 0 !important`.
    ///
    /// Property names are lower-cased, `!important` is dropped, and
    /// declarations without a name or a value are skipped. A property
    /// declared twice keeps its last value at its first position.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut block = Self::default();

        for declaration in source.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = strip_important(value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            block.set(name, value.to_string());
        }

        block
    }

    /// Declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> &[(String, String)] {
        &self.declarations
    }

    /// The declared value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the block declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn set(&mut self, name: String, value: String) {
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((name, value)),
        }
    }

    /// Overwrite or add every declaration of `other`.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in &other.declarations {
            self.set(name.clone(), value.clone());
        }
    }

    /// Assign every declaration to a box. Unknown property names are
    /// reported once and skipped.
    pub fn assign_to(&self, tree: &mut BoxTree, id: BoxId) {
        for (name, value) in &self.declarations {
            if !tree.set_property_by_name(id, name, value) {
                warn_once(Component::Css, &format!("unknown property '{name}'"));
            }
        }
    }
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(index) => value[..index].trim_end(),
        None => value,
    }
}

/// Rules of every style sheet fed to one document, by media type.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    media: BTreeMap<String, BTreeMap<String, DeclarationBlock>>,
}

impl StyleSheet {
    /// An empty sheet with an empty `all` media entry.
    #[must_use]
    pub fn new() -> Self {
        let mut sheet = Self::default();
        let _ = sheet.media.insert(ALL_MEDIA.to_string(), BTreeMap::new());
        sheet
    }

    /// Parse `source` and merge its rules.
    ///
    /// The text is lower-cased and its comments removed. Rules inside
    /// `@media a, b { ... }` are stored under each listed media type; other
    /// at-rules are dropped. Everything else goes under `all`.
    pub fn feed(&mut self, source: &str) {
        if source.trim().is_empty() {
            return;
        }

        let source = strip_comments(&source.to_lowercase());
        let (rest, at_rules) = extract_at_rules(&source);

        for at_rule in at_rules {
            let Some(header) = at_rule.strip_prefix("@media") else {
                continue;
            };
            let Some(open) = header.find('{') else {
                continue;
            };
            let body = &header[open + 1..];
            let body = body.strip_suffix('}').unwrap_or(body);

            for media in header[..open]
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|m| !m.is_empty())
            {
                for (selectors, declarations) in rule_blocks(body) {
                    self.feed_block(media, selectors, declarations);
                }
            }
        }

        for (selectors, declarations) in rule_blocks(&rest) {
            self.feed_block(ALL_MEDIA, selectors, declarations);
        }
    }

    fn feed_block(&mut self, media: &str, selectors: &str, declarations: &str) {
        let block = DeclarationBlock::parse(declarations);
        let rules = self.media.entry(media.to_string()).or_default();

        for selector in selectors.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let _ = rules
                .entry(selector.to_string())
                .and_modify(|existing| existing.merge(&block))
                .or_insert_with(|| block.clone());
        }
    }

    /// The block stored for `selector` under `media`.
    #[must_use]
    pub fn block(&self, media: &str, selector: &str) -> Option<&DeclarationBlock> {
        self.media.get(media)?.get(selector)
    }

    /// Media types that have rules.
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        self.media.keys().map(String::as_str)
    }

    /// Selectors stored under `media`, in sorted order.
    pub fn selectors(&self, media: &str) -> impl Iterator<Item = &str> {
        self.media
            .get(media)
            .into_iter()
            .flat_map(|rules| rules.keys().map(String::as_str))
    }
}

/// [CSS 2.1 § 4.1.9 Comments](https://www.w3.org/TR/CSS2/syndata.html#comments)
///
/// "Comments begin with the characters '/*' and end with the characters
/// '*/'." An unterminated comment runs to the end of the sheet.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                warn_once(Component::Css, "unterminated comment in style sheet");
            }
        }
    }
    result.push_str(rest);
    result
}

/// [CSS 2.1 § 4.1.5 At-rules](https://www.w3.org/TR/CSS2/syndata.html#at-rules)
///
/// "An at-rule consists of everything up to and including the next
/// semicolon (;) or the next block, whichever comes first."
///
/// Returns the sheet with every at-rule removed, and the at-rules.
fn extract_at_rules(source: &str) -> (String, Vec<&str>) {
    let mut rest = String::with_capacity(source.len());
    let mut at_rules = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = source[cursor..].find('@') {
        let start = cursor + offset;
        rest.push_str(&source[cursor..start]);

        let tail = &source[start..];
        let end = match tail.find(['{', ';']) {
            Some(i) if tail.as_bytes()[i] == b';' => start + i + 1,
            Some(i) => start + matching_brace(tail, i).map_or(tail.len(), |close| close + 1),
            None => source.len(),
        };
        at_rules.push(&source[start..end]);
        cursor = end;
    }
    rest.push_str(&source[cursor..]);

    (rest, at_rules)
}

/// Index of the `}` closing the `{` at `open`.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in text.char_indices().skip_while(|&(i, _)| i < open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Every `selectors { declarations }` rule of `source`, in order.
fn rule_blocks(source: &str) -> Vec<(&str, &str)> {
    let mut blocks = Vec::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        let selectors = rest[..open].trim();
        let after = &rest[open + 1..];
        let (declarations, next) = match after.find('}') {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => (after, ""),
        };
        if !selectors.is_empty() {
            blocks.push((selectors, declarations));
        }
        rest = next;
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rule_extent() {
        let (rest, at_rules) =
            extract_at_rules("@import url(x.css); p { color: red } @media print { b { x: y } } i {}");
        assert_eq!(at_rules, vec!["@import url(x.css);", "@media print { b { x: y } }"]);
        assert!(rest.contains("p { color: red }"));
        assert!(rest.contains("i {}"));
    }

    #[test]
    fn test_comment_removed() {
        assert_eq!(strip_comments("a/* x */b/* y"), "ab");
    }

    #[test]
    fn test_important_is_dropped() {
        let block = DeclarationBlock::parse("color: red !important; ; margin:");
        assert_eq!(block.declarations(), &[("color".to_string(), "red".to_string())]);
    }
}
