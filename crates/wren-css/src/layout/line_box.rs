//! [CSS 2.1 § 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "The rectangular area that contains the boxes that form a line is called
//! a line box."

use crate::box_model::Rect;
use crate::boxes::{BoxId, BoxTree};

/// Index of a line box in the tree's current measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// A word addressed by its owner and its position in the owner's words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordRef {
    /// The box owning the word.
    pub owner: BoxId,
    /// Index into the owner's words.
    pub index: usize,
}

/// One line of a block that contains only inline content.
///
/// Records the words placed on the line, in placement order, and the
/// fragment of every box that has content on it.
#[derive(Debug, Clone)]
pub struct LineBox {
    owner: BoxId,
    words: Vec<WordRef>,
    rectangles: Vec<(BoxId, Rect)>,
}

impl LineBox {
    pub(crate) const fn new(owner: BoxId) -> Self {
        Self {
            owner,
            words: Vec::new(),
            rectangles: Vec::new(),
        }
    }

    /// The block this line belongs to.
    #[must_use]
    pub const fn owner(&self) -> BoxId {
        self.owner
    }

    /// Words placed on the line, left to right in placement order.
    #[must_use]
    pub fn words(&self) -> &[WordRef] {
        &self.words
    }

    /// Box fragments on this line.
    #[must_use]
    pub fn rectangles(&self) -> &[(BoxId, Rect)] {
        &self.rectangles
    }

    /// The fragment of `id` on this line.
    #[must_use]
    pub fn rectangle_of(&self, id: BoxId) -> Option<Rect> {
        self.rectangles
            .iter()
            .find(|(b, _)| *b == id)
            .map(|(_, r)| *r)
    }

    pub(crate) fn report_word(&mut self, word: WordRef) {
        self.words.push(word);
    }

    pub(crate) fn clear_rectangles(&mut self) {
        self.rectangles.clear();
    }

    /// Grow the fragment of `id` to include `rect`, creating it if needed.
    pub(crate) fn union_rectangle(&mut self, id: BoxId, rect: Rect) {
        match self.rectangles.iter_mut().find(|(b, _)| *b == id) {
            Some((_, existing)) => *existing = existing.union(&rect),
            None => self.rectangles.push((id, rect)),
        }
    }
}

impl BoxTree {
    /// The line boxes of the current measurement pass.
    #[must_use]
    pub fn lines(&self) -> &[LineBox] {
        &self.lines
    }

    /// A line box of the current measurement pass.
    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&LineBox> {
        self.lines.get(id.0)
    }

    /// Start a new line in `block`.
    pub(crate) fn new_line(&mut self, block: BoxId) -> LineId {
        let id = LineId(self.lines.len());
        self.lines.push(LineBox::new(block));
        self.node_mut(block).line_boxes.push(id);
        id
    }
}
