//! Serializable projection of a measured tree.
//!
//! A [`BoxSnapshot`] copies out what layout decided (bounds, line
//! rectangles, word positions) together with enough identity (tag, kind,
//! display) to read it without the tree.

use serde::Serialize;

use crate::box_model::Rect;
use crate::boxes::{BoxId, BoxTree};

/// One box and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSnapshot {
    /// Arena index of the box.
    pub id: usize,
    /// Tag name, absent for anonymous boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// [`crate::boxes::BoxKind::label`].
    pub kind: &'static str,
    /// Declared `display`.
    pub display: String,
    /// Border box.
    pub bounds: Rect,
    /// One rectangle per line the box spans.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rectangles: Vec<Rect>,
    /// Words owned by the box.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordSnapshot>,
    /// Children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxSnapshot>,
}

/// One positioned word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSnapshot {
    /// The word's text; empty for an image.
    pub text: String,
    /// Image `src`, for an image word.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Position and measured size.
    pub bounds: Rect,
}

impl BoxSnapshot {
    /// Capture `id` and everything below it.
    #[must_use]
    pub fn capture(tree: &BoxTree, id: BoxId) -> Self {
        let node = tree.node(id);
        Self {
            id: id.0,
            tag: node.tag.as_ref().map(|t| t.name().to_string()),
            kind: node.kind.label(),
            display: tree.display(id).to_string(),
            bounds: tree.bounds(id),
            rectangles: node.rectangles.iter().map(|(_, r)| *r).collect(),
            words: node
                .words
                .iter()
                .map(|w| WordSnapshot {
                    text: w.text().to_string(),
                    image: w.image_src().map(str::to_string),
                    bounds: w.bounds(),
                })
                .collect(),
            children: tree
                .children(id)
                .iter()
                .map(|&c| Self::capture(tree, c))
                .collect(),
        }
    }

    /// This box and every descendant, depth-first in document order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.flatten());
        }
        out
    }

    /// The first box, depth-first, with tag `name`.
    #[must_use]
    pub fn find_tag(&self, name: &str) -> Option<&Self> {
        self.flatten()
            .into_iter()
            .find(|s| s.tag.as_deref() == Some(name))
    }
}
