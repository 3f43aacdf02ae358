//! Layout: positioning and sizing every box of the tree.
//!
//! [CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! [`measure_bounds`] walks the tree depth-first. Block-level boxes are
//! stacked below their previous in-flow sibling and sized from their
//! containing block; a block whose children are all inline flows them into
//! line boxes ([`inline`]); tables hand over to [`table`].

#[cfg(feature = "layout-trace")]
use std::cell::Cell;
use std::collections::HashMap;

use wren_common::image::LoadedImage;

use crate::box_model::{Point, Side, Size};
use crate::boxes::{BoxId, BoxKind, BoxTree};
use crate::style::{Property, is_block_level, is_table};
use crate::values::parse_length;

/// Line flow and alignment.
pub mod inline;
/// Line boxes.
pub mod line_box;
/// Text measurement.
pub mod metrics;
/// Table sizing and cell placement.
pub mod table;
/// Word measurement.
pub mod words;

pub use line_box::{LineBox, LineId, WordRef};
pub use metrics::{ApproximateFontMetrics, FontMetrics};

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Host capabilities and running results of one measurement pass.
pub struct LayoutContext<'a> {
    /// Text measurement.
    pub metrics: &'a dyn FontMetrics,
    /// Decoded images keyed by `src`.
    pub images: &'a HashMap<String, LoadedImage>,
    /// Furthest right and bottom edges reached by any box so far.
    pub maximum_size: Size,
}

impl<'a> LayoutContext<'a> {
    /// Start a pass.
    #[must_use]
    pub fn new(metrics: &'a dyn FontMetrics, images: &'a HashMap<String, LoadedImage>) -> Self {
        Self {
            metrics,
            images,
            maximum_size: Size::default(),
        }
    }
}

/// Lay out a whole tree whose root has already been given its location and
/// size.
///
/// Line boxes from any earlier pass are discarded first.
pub fn layout_tree(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>) {
    tree.lines.clear();
    let root = tree.root();
    measure_bounds(tree, ctx, root);
}

/// [CSS 2.1 § 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
///
/// Position and size `id` and its subtree.
pub fn measure_bounds(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) {
    let display = tree.display(id).to_string();
    if display == "none" {
        return;
    }

    #[cfg(feature = "layout-trace")]
    let _depth = {
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        eprintln!(
            "[LAYOUT DEPTH] depth={depth} box={id:?} tag={:?} display={display} children={}",
            tree.tag_name(id),
            tree.children(id).len()
        );
        // Guard struct decrements depth counter on all return paths.
        struct DepthGuard;
        impl Drop for DepthGuard {
            fn drop(&mut self) {
                LAYOUT_DEPTH.with(|d| d.set(d.get() - 1));
            }
        }
        DepthGuard
    };

    tree.node_mut(id).rectangles.clear();
    words::measure_words(tree, ctx, id);

    if is_block_level(&display) {
        // STEP 1: Position below the previous in-flow sibling.
        // [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
        //
        // "When two or more margins collapse, the resulting margin width is
        // the maximum of the collapsing margins' widths."
        //
        // Table cells are placed by their table.
        if display != "table-cell" {
            place_block(tree, id);
        }

        // STEP 2: Width from the containing block, or the declared width,
        // never narrower than the widest word.
        // [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
        if display != "table-cell" && display != "table" {
            size_block_width(tree, id);
        }

        // STEP 3: Lay out the content.
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[BLOCK STEP3] {id:?} table={} inlines_only={}",
            is_table(&display),
            tree.contains_inlines_only(id)
        );
        if is_table(&display) {
            table::layout_table(tree, ctx, id);
        } else if tree.contains_inlines_only(id) {
            let top = tree.location(id).y;
            tree.set_actual_bottom(id, top);
            inline::create_line_boxes(tree, ctx, id);
        } else {
            layout_block_children(tree, ctx, id);
        }

        // STEP 4: The list marker hangs off the left of the item.
        if display == "list-item" {
            place_list_marker(tree, ctx, id);
        }
    }

    ctx.maximum_size.width = ctx.maximum_size.width.max(tree.actual_right(id));
    ctx.maximum_size.height = ctx.maximum_size.height.max(tree.actual_bottom(id));
}

/// Location of a block from its containing block and previous sibling.
///
/// The top is the parent's content top (first child) or the previous
/// sibling's bottom edge plus its bottom border, then the larger of the two
/// adjoining margins.
fn place_block(tree: &mut BoxTree, id: BoxId) {
    let previous = tree.previous_in_flow_sibling(id);
    let cb = tree.containing_block(id);

    let left = tree.location(cb).x
        + tree.actual_padding(cb, Side::Left)
        + tree.actual_margin(id, Side::Left)
        + tree.actual_border_width(cb, Side::Left);

    let top = match (previous, tree.parent(id)) {
        (Some(prev), _) => {
            tree.actual_margin(prev, Side::Bottom).max(tree.actual_margin(id, Side::Top))
                + tree.actual_bottom(prev)
                + tree.actual_border_width(prev, Side::Bottom)
        }
        (None, Some(parent)) => tree.client_top(parent) + tree.actual_margin(id, Side::Top),
        (None, None) => tree.actual_margin(id, Side::Top),
    };

    tree.set_location(id, Point::new(left, top));
    tree.set_actual_bottom(id, top);
}

fn size_block_width(tree: &mut BoxTree, id: BoxId) {
    let minimum = tree.minimum_width(id);
    let cb = tree.containing_block(id);

    let mut width = tree.size(cb).width
        - tree.padding(cb).horizontal()
        - tree.border(cb).horizontal()
        - tree.margin(id).horizontal()
        - tree.border(id).horizontal();

    let declared = tree.property(id, Property::Width);
    if !matches!(declared, "auto" | "") {
        width = parse_length(declared, width, tree.em_height(id));
    }

    let height = tree.size(id).height;
    tree.set_size(id, Size::new(width.max(minimum), height));
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// "In a block formatting context, boxes are laid out one after the other,
/// vertically, beginning at the top of a containing block."
fn layout_block_children(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) {
    let mut last = None;
    for child in tree.children(id).to_vec() {
        if tree.display(child) == "none" {
            continue;
        }
        measure_bounds(tree, ctx, child);
        last = Some(child);
    }

    if let Some(last) = last {
        let bottom = tree.actual_bottom(last)
            + tree.actual_margin(last, Side::Bottom)
            + tree.actual_padding(id, Side::Bottom);
        if bottom > tree.actual_bottom(id) {
            tree.set_actual_bottom(id, bottom);
        }
    }
}

/// [CSS 2.1 § 12.5 Lists](https://www.w3.org/TR/CSS2/generate.html#lists)
///
/// "An element with 'display: list-item' generates a principal block box
/// for the element's content and, depending on the values of
/// 'list-style-type' and 'list-style-image', possibly also a marker box as
/// a visual indication that the element is a list item."
///
/// The marker is a detached box inheriting the item's style. Only
/// `decimal` produces text (`"N."`); it is placed 5px left of the item's
/// border box, level with its content top.
fn place_list_marker(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, id: BoxId) {
    let marker = if let Some(marker) = tree.node(id).list_marker {
        marker
    } else {
        let marker = tree.create_box(BoxKind::AnonymousInline, None);
        tree.inherit_style(marker, id, false);
        let text = if tree.property(id, Property::ListStyleType) == "decimal" {
            format!("{}.", tree.list_index(id))
        } else {
            String::new()
        };
        tree.set_text(marker, &text);
        tree.node_mut(id).list_marker = Some(marker);
        marker
    };

    words::measure_words(tree, ctx, marker);

    let left = tree.location(id).x;
    let top = tree.location(id).y + tree.actual_padding(id, Side::Top);
    let node = tree.node_mut(marker);
    if let Some(word) = node.words.first_mut() {
        word.left = left - word.width - 5.0;
        word.top = top;
        node.location = Point::new(word.left, word.top);
        node.size = Size::new(word.width, word.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(tree: &mut BoxTree, parent: BoxId) -> BoxId {
        let id = tree.create_box(BoxKind::Normal, None);
        tree.append_child(parent, id).unwrap();
        tree.set_property(id, Property::Display, "block");
        id
    }

    fn run(tree: &mut BoxTree, width: f32) {
        let images = HashMap::new();
        let mut ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
        tree.set_size(tree.root(), Size::new(width, 0.0));
        layout_tree(tree, &mut ctx);
    }

    #[test]
    fn test_adjoining_margins_take_the_larger() {
        let mut tree = BoxTree::new();
        let a = block(&mut tree, BoxId::ROOT);
        let b = block(&mut tree, BoxId::ROOT);
        tree.set_property(a, Property::MarginBottom, "10px");
        tree.set_property(b, Property::MarginTop, "4px");
        run(&mut tree, 200.0);

        assert!((tree.location(b).y - (tree.actual_bottom(a) + 10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_declared_width_percentage() {
        let mut tree = BoxTree::new();
        let a = block(&mut tree, BoxId::ROOT);
        tree.set_property(a, Property::Width, "50%");
        run(&mut tree, 200.0);
        assert!((tree.size(a).width - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hidden_child_is_not_positioned() {
        let mut tree = BoxTree::new();
        let a = block(&mut tree, BoxId::ROOT);
        tree.set_property(a, Property::Display, "none");
        tree.set_location(a, Point::new(-1.0, -1.0));
        run(&mut tree, 200.0);
        assert_eq!(tree.location(a), Point::new(-1.0, -1.0));
    }
}
