//! A positioned run of text, or an image, owned by one box.

use crate::box_model::Rect;
use crate::boxes::BoxId;

/// A word, a run of white space, a line break, a tab, or an image.
///
/// Words are created by [`super::split_words`] (text) or by image
/// measurement (`<img>`). Layout assigns `left`/`top` during line flow and
/// `width`/`height` during measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxWord {
    owner: BoxId,
    text: String,
    image: Option<String>,
    /// Horizontal position of the left edge.
    pub left: f32,
    /// Vertical position of the top edge.
    pub top: f32,
    /// Measured width.
    pub width: f32,
    /// Measured height.
    pub height: f32,
}

impl BoxWord {
    /// A text word owned by `owner`.
    #[must_use]
    pub fn new(owner: BoxId, text: &str) -> Self {
        Self {
            owner,
            text: text.to_string(),
            image: None,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// An image word for the image at `src`.
    #[must_use]
    pub fn image(owner: BoxId, src: &str, width: f32, height: f32) -> Self {
        Self {
            image: Some(src.to_string()),
            width,
            height,
            ..Self::new(owner, "")
        }
    }

    /// The box whose text this word came from.
    #[must_use]
    pub const fn owner(&self) -> BoxId {
        self.owner
    }

    /// The text of the word.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The `src` of an image word.
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Whether this word is an image.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        self.image.is_some()
    }

    /// A run of white space (including line breaks and tabs).
    #[must_use]
    pub fn is_spaces(&self) -> bool {
        self.image.is_none() && self.text.trim().is_empty()
    }

    /// A forced line break.
    #[must_use]
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }

    /// A tab.
    #[must_use]
    pub fn is_tab(&self) -> bool {
        self.text == "\t"
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// The word's rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Turn line breaks and tabs into plain spaces, for white-space modes
    /// that do not honor them.
    pub(crate) fn replace_line_breaks_and_tabs(&mut self) {
        if self.text.contains(['\n', '\t']) {
            self.text = self.text.replace(['\n', '\t'], " ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let owner = BoxId(1);
        assert!(BoxWord::new(owner, "   ").is_spaces());
        assert!(BoxWord::new(owner, "\n").is_line_break());
        assert!(BoxWord::new(owner, "\n").is_spaces());
        assert!(BoxWord::new(owner, "\t").is_tab());
        assert!(!BoxWord::new(owner, "word").is_spaces());
        assert!(!BoxWord::image(owner, "a.png", 1.0, 1.0).is_spaces());
    }

    #[test]
    fn test_replace_line_breaks() {
        let mut w = BoxWord::new(BoxId(1), "\n");
        w.replace_line_breaks_and_tabs();
        assert_eq!(w.text(), " ");
        assert!(!w.is_line_break());
    }
}
