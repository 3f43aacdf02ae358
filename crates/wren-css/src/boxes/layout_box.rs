//! The box record stored in the [`super::BoxTree`] arena.

use std::cell::OnceCell;

use wren_html::Tag;

use super::BoxId;
use crate::box_model::{Point, Rect, Size};
use crate::layout::LineId;
use crate::style::{Font, PROPERTY_TABLE, Property};
use crate::text::BoxWord;
use crate::values::Color;

/// [CSS 2.1 § 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
/// and [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
///
/// How a box came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    /// Generated by a tag, or the initial container.
    Normal,
    /// "Any text that is directly contained inside a block container element
    /// must be treated as an anonymous inline element."
    AnonymousInline,
    /// Wraps a run of inline siblings of block boxes.
    AnonymousBlock,
    /// White-space-only text.
    AnonymousSpaceInline,
    /// Wraps a lone white-space box between blocks. Never displayed.
    AnonymousSpaceBlock,
    /// Placeholder occupying a grid slot covered by a cell from an earlier
    /// row with `rowspan > 1`.
    TableSpacer {
        /// The spanning cell.
        extended: BoxId,
        /// Row index of the spanning cell.
        start_row: usize,
        /// Last row index the spanning cell covers.
        end_row: usize,
    },
}

impl BoxKind {
    /// Either kind of white-space box.
    #[must_use]
    pub const fn is_anonymous_space(self) -> bool {
        matches!(self, Self::AnonymousSpaceInline | Self::AnonymousSpaceBlock)
    }

    /// Short name used in dumps and snapshots.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::AnonymousInline => "anonymous-inline",
            Self::AnonymousBlock => "anonymous-block",
            Self::AnonymousSpaceInline => "anonymous-space-inline",
            Self::AnonymousSpaceBlock => "anonymous-space-block",
            Self::TableSpacer { .. } => "table-spacer",
        }
    }
}

/// Memoized actual values.
///
/// Each entry is resolved from the declared value on first read and kept
/// until the next property write on the box clears the whole cache.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComputedCache {
    pub(crate) padding: [OnceCell<f32>; 4],
    pub(crate) margin: [OnceCell<f32>; 4],
    pub(crate) border_width: [OnceCell<f32>; 4],
    pub(crate) border_color: [OnceCell<Color>; 4],
    pub(crate) corner_radius: [OnceCell<f32>; 4],
    pub(crate) color: OnceCell<Color>,
    pub(crate) background_color: OnceCell<Color>,
    pub(crate) background_gradient: OnceCell<Color>,
    pub(crate) gradient_angle: OnceCell<f32>,
    pub(crate) text_indent: OnceCell<f32>,
    pub(crate) border_spacing: OnceCell<(f32, f32)>,
    pub(crate) font: OnceCell<Font>,
}

/// A node of the box tree.
///
/// Fields are crate-private; read them through [`super::BoxTree`], which
/// also resolves the computed values that depend on ancestors.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub(crate) tag: Option<Tag>,
    pub(crate) kind: BoxKind,
    pub(crate) parent: Option<BoxId>,
    pub(crate) children: Vec<BoxId>,

    pub(crate) declared: [String; Property::COUNT],
    pub(crate) computed: ComputedCache,

    pub(crate) text: String,
    pub(crate) words: Vec<BoxWord>,
    pub(crate) words_measured: bool,
    pub(crate) word_spacing: Option<f32>,

    /// Border-box origin.
    pub(crate) location: Point,
    /// Border-box extent.
    pub(crate) size: Size,
    /// Per-line fragments of an inline box.
    pub(crate) rectangles: Vec<(LineId, Rect)>,
    /// Line boxes owned by a block that contains only inlines.
    pub(crate) line_boxes: Vec<LineId>,
    pub(crate) first_hosting_line: Option<LineId>,
    pub(crate) last_hosting_line: Option<LineId>,

    /// Rowspan spacers have been inserted (tables only).
    pub(crate) table_fixed: bool,
    /// Detached box holding the marker of a `list-item`.
    pub(crate) list_marker: Option<BoxId>,
}

impl LayoutBox {
    pub(crate) fn new(kind: BoxKind, tag: Option<Tag>) -> Self {
        Self {
            tag,
            kind,
            parent: None,
            children: Vec::new(),
            declared: std::array::from_fn(|i| PROPERTY_TABLE[i].default.to_string()),
            computed: ComputedCache::default(),
            text: String::new(),
            words: Vec::new(),
            words_measured: false,
            word_spacing: None,
            location: Point::default(),
            size: Size::default(),
            rectangles: Vec::new(),
            line_boxes: Vec::new(),
            first_hosting_line: None,
            last_hosting_line: None,
            table_fixed: false,
            list_marker: None,
        }
    }

    /// The generating tag, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Lowercase tag name, or `""` for anonymous boxes and the root.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        self.tag.as_ref().map_or("", Tag::name)
    }

    /// How this box came to exist.
    #[must_use]
    pub const fn kind(&self) -> BoxKind {
        self.kind
    }

    /// The parent box, `None` for the root and detached boxes.
    #[must_use]
    pub const fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    /// Child boxes in document order.
    #[must_use]
    pub fn children(&self) -> &[BoxId] {
        &self.children
    }

    /// The declared value of `property`.
    #[must_use]
    pub fn property(&self, property: Property) -> &str {
        &self.declared[property.index()]
    }

    /// The text this box was created with (anonymous inline boxes).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The box's words, in order.
    #[must_use]
    pub fn words(&self) -> &[BoxWord] {
        &self.words
    }

    /// Border-box origin.
    #[must_use]
    pub const fn location(&self) -> Point {
        self.location
    }

    /// Border-box extent.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Border box as a rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(
            self.location.x,
            self.location.y,
            self.size.width,
            self.size.height,
        )
    }

    /// `location.x + size.width`
    #[must_use]
    pub fn actual_right(&self) -> f32 {
        self.location.x + self.size.width
    }

    /// `location.y + size.height`
    #[must_use]
    pub fn actual_bottom(&self) -> f32 {
        self.location.y + self.size.height
    }

    /// Per-line fragments, in line order.
    #[must_use]
    pub fn rectangles(&self) -> &[(LineId, Rect)] {
        &self.rectangles
    }

    /// The fragment on `line`, if the box has one there.
    #[must_use]
    pub fn rectangle_on(&self, line: LineId) -> Option<Rect> {
        self.rectangles
            .iter()
            .find(|(l, _)| *l == line)
            .map(|(_, r)| *r)
    }

    /// Line boxes created for this block.
    #[must_use]
    pub fn line_boxes(&self) -> &[LineId] {
        &self.line_boxes
    }

    /// The list marker box of a `list-item`.
    #[must_use]
    pub const fn list_marker(&self) -> Option<BoxId> {
        self.list_marker
    }
}
