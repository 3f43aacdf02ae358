//! Flat tag/text scanning of a document.
//!
//! The scanner does not build a tree. It reports tags and the text between
//! them in document order:
//!
//! ```text
//! "<p>Hello <b>you</b></p>"
//!   -> Tag(<p>) Text("Hello ") Tag(<b>) Text("you") Tag(</b>) Tag(</p>)
//! ```
//!
//! Comments are dropped. The contents of `<style>` and `<script>` are raw
//! text: no tags are recognized inside them and character references are
//! left alone.

use wren_common::warning::{Component, warn_once};

use crate::entities::decode_entities;
use crate::tag::Tag;

/// Elements whose content is reported verbatim as a single text run.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["style", "script"];

/// One item of the scanned document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// A start or end tag.
    Tag(Tag),
    /// The characters between two tags, references decoded.
    Text(String),
}

/// Turns raw document text into a token stream.
///
/// Tree construction depends only on this trait, so a host can substitute
/// its own tokenizer.
pub trait DocumentTokenizer {
    /// Tokenize `source` in document order.
    fn tokenize(&self, source: &str) -> Vec<MarkupToken>;
}

/// The built-in [`DocumentTokenizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupScanner;

impl MarkupScanner {
    /// Create a scanner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentTokenizer for MarkupScanner {
    fn tokenize(&self, source: &str) -> Vec<MarkupToken> {
        let mut run = ScanRun::new(source);
        run.run();
        run.tokens
    }
}

/// State for a single pass over one document.
struct ScanRun<'a> {
    input: &'a str,
    pos: usize,
    text: String,
    tokens: Vec<MarkupToken>,
}

impl<'a> ScanRun<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            text: String::new(),
            tokens: Vec::new(),
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn next_few_characters_are(&self, target: &str) -> bool {
        self.remaining().starts_with(target)
    }

    fn run(&mut self) {
        while let Some(lt) = self.remaining().find('<') {
            let before = &self.input[self.pos..self.pos + lt];
            self.text.push_str(before);
            self.pos += lt;

            if self.next_few_characters_are("<!--") {
                self.skip_comment();
                continue;
            }

            if !self.at_tag_open() {
                self.text.push('<');
                self.pos += 1;
                continue;
            }

            let Some(len) = tag_length(self.remaining()) else {
                // Unterminated tag: the rest of the document is text.
                break;
            };

            let raw = &self.input[self.pos..self.pos + len];
            self.pos += len;
            self.flush_text();

            let tag = Tag::parse(raw);
            let raw_text = !tag.is_closing() && RAW_TEXT_ELEMENTS.contains(&tag.name());
            let name = tag.name().to_string();
            self.tokens.push(MarkupToken::Tag(tag));
            if raw_text {
                self.consume_raw_text(&name);
            }
        }

        let rest = self.remaining();
        self.text.push_str(rest);
        self.pos = self.input.len();
        self.flush_text();
    }

    /// `<` followed by a letter, `/` or `!` opens a tag; anything else is a
    /// literal `<` in text.
    fn at_tag_open(&self) -> bool {
        self.remaining()
            .chars()
            .nth(1)
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
    }

    fn skip_comment(&mut self) {
        match self.remaining()[4..].find("-->") {
            Some(end) => self.pos += 4 + end + 3,
            None => {
                warn_once(Component::Html, "unterminated comment runs to end of document");
                self.pos = self.input.len();
            }
        }
    }

    fn consume_raw_text(&mut self, name: &str) {
        let closing = format!("</{name}");
        let rest = self.remaining();
        let end = rest
            .to_ascii_lowercase()
            .find(&closing)
            .unwrap_or(rest.len());
        if end > 0 {
            self.tokens
                .push(MarkupToken::Text(rest[..end].to_string()));
        }
        self.pos += end;
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let decoded = decode_entities(&text).into_owned();
        self.tokens.push(MarkupToken::Text(decoded));
    }
}

/// Byte length of the tag at the start of `input` up to and including its
/// `>`, skipping any `>` inside quoted attribute values.
fn tag_length(input: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in input.char_indices().skip(1) {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_length_plain() {
        assert_eq!(tag_length("<p>rest"), Some(3));
    }

    #[test]
    fn test_tag_length_quoted_gt() {
        assert_eq!(tag_length(r#"<a title="x>y">"#), Some(15));
    }

    #[test]
    fn test_tag_length_unterminated() {
        assert_eq!(tag_length("<p class"), None);
    }
}
