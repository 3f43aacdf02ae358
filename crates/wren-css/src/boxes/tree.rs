//! Arena storage for boxes.

use thiserror::Error;
use wren_html::Tag;

use super::{BoxKind, LayoutBox};
use crate::box_model::{Point, Rect, Size};
use crate::layout::LineBox;
use crate::style::{DEFAULT_FONT_SIZE_PT, GenericFamilies, Property, shorthand};
use crate::text::{BoxWord, split_words};
use crate::values::{Length, LengthUnit};

/// A type-safe index into the box tree.
///
/// Indices are stable for the lifetime of the tree; boxes are never freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

impl BoxId {
    /// The initial container is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A structural edit that would break the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The edit would make a box its own ancestor.
    #[error("moving box {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The box being moved.
        child: BoxId,
        /// The requested new parent.
        parent: BoxId,
    },
    /// The id does not name a box of this tree.
    #[error("box {0:?} does not exist")]
    OutOfRange(BoxId),
}

/// Properties whose change alters the font of every descendant.
const FONT_PROPERTIES: [Property; 5] = [
    Property::Font,
    Property::FontFamily,
    Property::FontSize,
    Property::FontStyle,
    Property::FontWeight,
];

/// Arena-based box tree.
///
/// The initial container is created with the tree at [`BoxId::ROOT`]. It is
/// the only box that is both parentless and displayed; other parentless
/// boxes (list markers, boxes not yet attached) are detached.
///
/// Accessors that take a [`BoxId`] panic when the id was not allocated by
/// this tree. [`BoxTree::get`] checks an id without panicking, and
/// structural edits report unknown ids as [`TreeError::OutOfRange`].
#[derive(Debug, Clone)]
pub struct BoxTree {
    pub(crate) boxes: Vec<LayoutBox>,
    /// Line boxes created by the current measurement pass.
    pub(crate) lines: Vec<LineBox>,
    base_font_size: f32,
    generic_families: GenericFamilies,
}

impl BoxTree {
    /// A tree holding only the initial container, with `medium` at 12pt and
    /// the default generic families.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fonts(DEFAULT_FONT_SIZE_PT, GenericFamilies::default())
    }

    /// A tree holding only the initial container.
    ///
    /// `base_font_size` is the size of `font-size: medium` in points;
    /// `generic_families` replaces generic `font-family` keywords.
    #[must_use]
    pub fn with_fonts(base_font_size: f32, generic_families: GenericFamilies) -> Self {
        let mut root = LayoutBox::new(BoxKind::Normal, None);
        root.declared[Property::Display.index()] = "block".to_string();
        Self {
            boxes: vec![root],
            lines: Vec::new(),
            base_font_size,
            generic_families,
        }
    }

    /// The initial container.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        BoxId::ROOT
    }

    /// Number of boxes ever allocated, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always false: the initial container exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by its id.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    /// Size of `font-size: medium`, in points.
    #[must_use]
    pub const fn base_font_size(&self) -> f32 {
        self.base_font_size
    }

    pub(crate) fn node(&self, id: BoxId) -> &LayoutBox {
        match self.boxes.get(id.0) {
            Some(node) => node,
            None => panic!("{id:?} is not a box of this tree"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        match self.boxes.get_mut(id.0) {
            Some(node) => node,
            None => panic!("{id:?} is not a box of this tree"),
        }
    }

    /// Allocate a detached box.
    ///
    /// The box starts with every property at its table default. Attach it
    /// with [`BoxTree::append_child`] or [`BoxTree::insert_before`].
    pub fn create_box(&mut self, kind: BoxKind, tag: Option<Tag>) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox::new(kind, tag));
        id
    }

    // ========== Structure ==========

    /// The parent of `id`.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(|b| b.parent)
    }

    /// The children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map_or(&[], |b| b.children.as_slice())
    }

    /// Iterate over the ancestors of `id`, from its parent up.
    #[must_use]
    pub fn ancestors(&self, id: BoxId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Whether `ancestor` is a proper ancestor of `descendant`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: BoxId, ancestor: BoxId) -> bool {
        self.ancestors(descendant).any(|a| a == ancestor)
    }

    /// The sibling immediately before `id`, ignoring display.
    #[must_use]
    pub fn previous_sibling(&self, id: BoxId) -> Option<BoxId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&s| s == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Move `child` to the end of `parent`'s children, detaching it from its
    /// current parent first.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Cycle`] if `parent` is `child` or one of its
    /// descendants, and [`TreeError::OutOfRange`] if either id is unknown.
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) -> Result<(), TreeError> {
        self.check_move(child, parent)?;
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Alias of [`BoxTree::append_child`] with the arguments in "move this
    /// box under that one" order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Cycle`] if `new_parent` is `child` or one of its
    /// descendants.
    pub fn reparent(&mut self, child: BoxId, new_parent: BoxId) -> Result<(), TreeError> {
        self.append_child(new_parent, child)
    }

    /// Insert `child` into `parent` immediately before `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Cycle`] if `parent` is `child` or one of its
    /// descendants.
    ///
    /// # Panics
    ///
    /// Panics if `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: BoxId,
        child: BoxId,
        reference: BoxId,
    ) -> Result<(), TreeError> {
        self.check_move(child, parent)?;
        self.detach(child);
        let Some(index) = self.children(parent).iter().position(|&c| c == reference) else {
            panic!("insert_before: {reference:?} is not a child of {parent:?}");
        };
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Insert `child` at `index` in `parent`'s child list, without any of the
    /// checks of [`BoxTree::insert_before`]. Used for freshly created boxes.
    pub(crate) fn insert_child_at(&mut self, parent: BoxId, index: usize, child: BoxId) {
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Detach `child` from `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: BoxId, child: BoxId) {
        let Some(index) = self.children(parent).iter().position(|&c| c == child) else {
            panic!("remove_child: {child:?} is not a child of {parent:?}");
        };
        let _ = self.node_mut(parent).children.remove(index);
        self.node_mut(child).parent = None;
    }

    fn check_move(&self, child: BoxId, parent: BoxId) -> Result<(), TreeError> {
        if let Some(&missing) = [child, parent].iter().find(|id| id.0 >= self.boxes.len()) {
            return Err(TreeError::OutOfRange(missing));
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(TreeError::Cycle { child, parent });
        }
        Ok(())
    }

    fn detach(&mut self, child: BoxId) {
        if let Some(old) = self.parent(child) {
            self.remove_child(old, child);
        }
    }

    // ========== Content ==========

    /// The generating tag of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    #[must_use]
    pub fn tag(&self, id: BoxId) -> Option<&Tag> {
        self.node(id).tag.as_ref()
    }

    /// The lowercase tag name of `id`, `""` if it has no tag.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    #[must_use]
    pub fn tag_name(&self, id: BoxId) -> &str {
        self.node(id).tag_name()
    }

    /// How `id` came to exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    #[must_use]
    pub fn kind(&self, id: BoxId) -> BoxKind {
        self.node(id).kind
    }

    /// The words of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    #[must_use]
    pub fn words(&self, id: BoxId) -> &[BoxWord] {
        &self.node(id).words
    }

    /// Replace the text of `id` and split it into words.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    pub fn set_text(&mut self, id: BoxId, text: &str) {
        let node = self.node_mut(id);
        node.text = text.to_string();
        node.words = split_words(id, text);
        node.words_measured = false;
    }

    // ========== Declared properties ==========

    /// The declared value of `property` on `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    #[must_use]
    pub fn property(&self, id: BoxId, property: Property) -> &str {
        self.node(id).property(property)
    }

    /// The declared `display` of `id`.
    #[must_use]
    pub fn display(&self, id: BoxId) -> &str {
        self.property(id, Property::Display)
    }

    /// Assign a declared value.
    ///
    /// The value is trimmed and normalized before it is stored:
    ///
    /// - `font-size` lengths that fail to parse become `medium`, and `em`
    ///   sizes are rewritten in points against the parent's size
    /// - `em` values of `line-height`, `text-indent` and `word-spacing` are
    ///   rewritten in pixels against the box's own font
    /// - a `font-family` that is exactly a generic keyword is replaced by
    ///   its concrete family
    ///
    /// Every memoized value of the box is dropped (and, for font
    /// properties, those of its descendants). Shorthands then assign their
    /// longhands.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a box of this tree.
    pub fn set_property(&mut self, id: BoxId, property: Property, value: &str) {
        let value = self.normalize(id, property, value.trim());

        self.node_mut(id).declared[property.index()].clone_from(&value);
        self.invalidate(id, FONT_PROPERTIES.contains(&property));

        for (longhand, v) in shorthand::expand(property, &value) {
            self.set_property(id, longhand, &v);
        }
    }

    /// Assign a declared value by CSS name. Returns `false` (and assigns
    /// nothing) for names the engine does not know.
    pub fn set_property_by_name(&mut self, id: BoxId, name: &str, value: &str) -> bool {
        match Property::from_name(name) {
            Some(property) => {
                self.set_property(id, property, value);
                true
            }
            None => false,
        }
    }

    /// [CSS 2.1 § 6.2 Inheritance](https://www.w3.org/TR/CSS2/cascade.html#inheritance)
    ///
    /// Copy the inherited properties of `from` onto `id`, or every property
    /// when `everything` is set.
    pub fn inherit_style(&mut self, id: BoxId, from: BoxId, everything: bool) {
        if everything {
            let declared = self.node(from).declared.clone();
            self.node_mut(id).declared = declared;
        } else {
            for property in Property::inherited() {
                let value = self.property(from, property).to_string();
                self.node_mut(id).declared[property.index()] = value;
            }
        }
        self.invalidate(id, true);
    }

    fn normalize(&self, id: BoxId, property: Property, value: &str) -> String {
        match property {
            Property::FontSize => {
                let looks_like_length = value
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == '-')
                    || value.ends_with('%');
                if !looks_like_length {
                    return value.to_string();
                }
                let length = Length::parse(value);
                if length.has_error() {
                    return "medium".to_string();
                }
                let Some(parent) = self.parent(id).filter(|_| length.unit() == LengthUnit::Em)
                else {
                    return value.to_string();
                };
                let parent_size = self.actual_font(parent).size;
                length
                    .convert_em_to_points(parent_size)
                    .map_or_else(|| value.to_string(), |l| l.to_string())
            }
            Property::LineHeight | Property::TextIndent | Property::WordSpacing => {
                Length::parse(value)
                    .convert_em_to_pixels(self.em_height(id))
                    .map_or_else(|| value.to_string(), |l| l.to_string())
            }
            Property::FontFamily => self
                .generic_families
                .resolve(value)
                .unwrap_or(value)
                .to_string(),
            _ => value.to_string(),
        }
    }

    /// Drop memoized values of `id`, and of its whole subtree when
    /// `descendants` is set.
    fn invalidate(&mut self, id: BoxId, descendants: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node_mut(current);
            node.computed = super::layout_box::ComputedCache::default();
            node.word_spacing = None;
            if descendants {
                stack.extend(node.children.iter().copied());
            }
        }
    }

    pub(crate) fn generic_families(&self) -> &GenericFamilies {
        &self.generic_families
    }

    // ========== Geometry ==========
    //
    // Like the accessors above, these panic on an id from another tree.

    /// Border-box origin of `id`.
    #[must_use]
    pub fn location(&self, id: BoxId) -> Point {
        self.node(id).location
    }

    /// Border-box extent of `id`.
    #[must_use]
    pub fn size(&self, id: BoxId) -> Size {
        self.node(id).size
    }

    /// Border box of `id`.
    #[must_use]
    pub fn bounds(&self, id: BoxId) -> Rect {
        self.node(id).bounds()
    }

    /// Set the border-box origin.
    pub fn set_location(&mut self, id: BoxId, location: Point) {
        self.node_mut(id).location = location;
    }

    /// Set the border-box extent.
    pub fn set_size(&mut self, id: BoxId, size: Size) {
        self.node_mut(id).size = size;
    }

    /// Right edge of the border box.
    #[must_use]
    pub fn actual_right(&self, id: BoxId) -> f32 {
        self.node(id).actual_right()
    }

    /// Bottom edge of the border box.
    #[must_use]
    pub fn actual_bottom(&self, id: BoxId) -> f32 {
        self.node(id).actual_bottom()
    }

    /// Move the right edge, keeping the left edge in place.
    pub fn set_actual_right(&mut self, id: BoxId, right: f32) {
        let node = self.node_mut(id);
        node.size.width = right - node.location.x;
    }

    /// Move the bottom edge, keeping the top edge in place.
    pub fn set_actual_bottom(&mut self, id: BoxId, bottom: f32) {
        let node = self.node_mut(id);
        node.size.height = bottom - node.location.y;
    }
}

impl Default for BoxTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a box.
pub struct Ancestors<'a> {
    tree: &'a BoxTree,
    current: Option<BoxId>,
}

impl Iterator for Ancestors<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root > a > b > c
    fn chain() -> (BoxTree, BoxId, BoxId, BoxId) {
        let mut tree = BoxTree::new();
        let a = tree.create_box(BoxKind::Normal, None);
        let b = tree.create_box(BoxKind::Normal, None);
        let c = tree.create_box(BoxKind::Normal, None);
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(b, c).unwrap();
        (tree, a, b, c)
    }

    /// Parent and children of every box.
    fn structure(tree: &BoxTree) -> Vec<(Option<BoxId>, Vec<BoxId>)> {
        (0..tree.len())
            .map(|i| (tree.parent(BoxId(i)), tree.children(BoxId(i)).to_vec()))
            .collect()
    }

    #[test]
    fn test_append_ancestor_under_descendant_is_a_cycle() {
        let (mut tree, a, _, c) = chain();
        let before = structure(&tree);

        assert_eq!(
            tree.append_child(c, a),
            Err(TreeError::Cycle { child: a, parent: c })
        );
        assert_eq!(structure(&tree), before);
    }

    #[test]
    fn test_append_box_under_itself_is_a_cycle() {
        let (mut tree, _, b, _) = chain();
        let before = structure(&tree);

        assert_eq!(
            tree.append_child(b, b),
            Err(TreeError::Cycle { child: b, parent: b })
        );
        assert_eq!(tree.reparent(b, b), Err(TreeError::Cycle { child: b, parent: b }));
        assert_eq!(structure(&tree), before);
    }

    #[test]
    fn test_insert_before_rejects_cycles() {
        let (mut tree, a, b, c) = chain();
        let before = structure(&tree);

        assert_eq!(
            tree.insert_before(b, a, c),
            Err(TreeError::Cycle { child: a, parent: b })
        );
        assert_eq!(structure(&tree), before);
    }

    #[test]
    fn test_unknown_ids_are_out_of_range() {
        let (mut tree, a, b, c) = chain();
        let foreign = BoxId(tree.len() + 7);
        let before = structure(&tree);

        assert_eq!(tree.append_child(foreign, a), Err(TreeError::OutOfRange(foreign)));
        assert_eq!(tree.append_child(a, foreign), Err(TreeError::OutOfRange(foreign)));
        assert_eq!(
            tree.insert_before(b, foreign, c),
            Err(TreeError::OutOfRange(foreign))
        );
        assert!(tree.get(foreign).is_none());
        assert!(tree.children(foreign).is_empty());
        assert_eq!(structure(&tree), before);
    }

    #[test]
    fn test_id_of_a_larger_tree_is_out_of_range() {
        let (big, ..) = chain();
        let mut small = BoxTree::new();
        let last = BoxId(big.len() - 1);
        let before = structure(&small);

        assert_eq!(
            small.append_child(small.root(), last),
            Err(TreeError::OutOfRange(last))
        );
        assert_eq!(structure(&small), before);
    }

    #[test]
    fn test_moving_keeps_the_tree_consistent() {
        let (mut tree, a, b, c) = chain();
        tree.append_child(a, c).unwrap();

        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.children(a), &[b, c]);
        assert!(tree.children(b).is_empty());
    }

    #[test]
    #[should_panic(expected = "is not a box of this tree")]
    fn test_accessor_panics_on_unknown_id() {
        let tree = BoxTree::new();
        let _ = tree.kind(BoxId(5));
    }
}
