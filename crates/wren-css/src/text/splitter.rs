//! [CSS 2.1 § 16.6 White space](https://www.w3.org/TR/CSS2/text.html#white-space-prop)
//!
//! Text is cut into alternating runs of white space and non-white space.
//! Line breaks and tabs always stand alone so the line flow can honor them
//! under `pre`; measurement turns them back into spaces for the modes that
//! collapse them.

use super::BoxWord;
use crate::boxes::BoxId;

/// "This property declares how white space inside the element is handled."
///
/// `normal`, `nowrap` and `pre-line`: "sequences of white space are
/// collapsed".
#[must_use]
pub fn collapses_white_space(white_space: &str) -> bool {
    matches!(white_space, "normal" | "nowrap" | "pre-line")
}

/// `normal` and `nowrap`: line breaks and tabs are treated as spaces.
#[must_use]
pub fn eliminates_line_breaks(white_space: &str) -> bool {
    matches!(white_space, "normal" | "nowrap")
}

/// Split `text` into words owned by `owner`.
///
/// Carriage returns are dropped. A run of spaces becomes one word; each
/// `\n` and each `\t` becomes a one-character word; every other run of
/// characters becomes one word.
///
/// ```ignore
/// let words = split_words(BoxId(1), "a  b\nc");
/// // ["a", "  ", "b", "\n", "c"]
/// ```
#[must_use]
pub fn split_words(owner: BoxId, text: &str) -> Vec<BoxWord> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_space = false;

    let cut = |current: &mut String, words: &mut Vec<BoxWord>| {
        if !current.is_empty() {
            words.push(BoxWord::new(owner, current));
            current.clear();
        }
    };

    for c in text.chars().filter(|&c| c != '\r') {
        match c {
            '\n' | '\t' => {
                cut(&mut current, &mut words);
                words.push(BoxWord::new(owner, if c == '\n' { "\n" } else { "\t" }));
                in_space = true;
            }
            c if c.is_whitespace() => {
                if !in_space {
                    cut(&mut current, &mut words);
                }
                current.push(' ');
                in_space = true;
            }
            c => {
                if in_space {
                    cut(&mut current, &mut words);
                }
                current.push(c);
                in_space = false;
            }
        }
    }
    cut(&mut current, &mut words);

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        split_words(BoxId(1), text)
            .iter()
            .map(|w| w.text().to_string())
            .collect()
    }

    #[test]
    fn test_space_runs_are_one_word() {
        assert_eq!(texts("a  b"), ["a", "  ", "b"]);
    }

    #[test]
    fn test_line_break_stands_alone() {
        assert_eq!(texts("a \nb"), ["a", " ", "\n", "b"]);
    }

    #[test]
    fn test_carriage_return_dropped() {
        assert_eq!(texts("a\r\nb"), ["a", "\n", "b"]);
    }

    #[test]
    fn test_empty() {
        assert!(texts("").is_empty());
    }
}
