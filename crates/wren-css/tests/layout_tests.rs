//! Integration tests for block stacking and line-box flow.

use std::collections::HashMap;

use wren_css::{
    ApproximateFontMetrics, BoxId, BoxKind, BoxTree, LayoutContext, Property, Size, layout_tree,
};

fn block(tree: &mut BoxTree, parent: BoxId) -> BoxId {
    let id = tree.create_box(BoxKind::Normal, None);
    tree.append_child(parent, id).unwrap();
    tree.set_property(id, Property::Display, "block");
    id
}

fn text(tree: &mut BoxTree, parent: BoxId, content: &str) -> BoxId {
    let id = tree.create_box(BoxKind::AnonymousInline, None);
    tree.append_child(parent, id).unwrap();
    tree.set_text(id, content);
    id
}

fn run(tree: &mut BoxTree, width: f32) {
    let images = HashMap::new();
    let mut ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
    tree.set_size(tree.root(), Size::new(width, 0.0));
    layout_tree(tree, &mut ctx);
}

fn line_count(tree: &BoxTree, id: BoxId) -> usize {
    tree.get(id).unwrap().line_boxes().len()
}

// ========== Block flow ==========

#[test]
fn test_blocks_stack_vertically() {
    let mut tree = BoxTree::new();
    let a = block(&mut tree, BoxId::ROOT);
    let _ = text(&mut tree, a, "first");
    let b = block(&mut tree, BoxId::ROOT);
    let _ = text(&mut tree, b, "second");
    run(&mut tree, 300.0);

    assert!(tree.location(b).y >= tree.actual_bottom(a) - 1e-3);
    assert!((tree.size(a).width - 300.0).abs() < f32::EPSILON);
}

#[test]
fn test_maximum_size_tracks_furthest_bottom() {
    let mut tree = BoxTree::new();
    let a = block(&mut tree, BoxId::ROOT);
    let _ = text(&mut tree, a, "one two three four five six seven eight");
    let images = HashMap::new();
    let mut ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
    tree.set_size(tree.root(), Size::new(60.0, 0.0));
    layout_tree(&mut tree, &mut ctx);

    assert!(ctx.maximum_size.height >= tree.actual_bottom(a) - 1e-3);
}

// ========== Wrapping ==========

#[test]
fn test_long_text_wraps_inside_content_edge() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let t = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);

    assert!(line_count(&tree, p) >= 2);
    let right = tree.client_right(p);
    for word in tree.words(t) {
        assert!(word.right() <= right + 1e-3, "{word:?} crosses {right}");
    }
}

#[test]
fn test_nowrap_keeps_one_line() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let t = text(&mut tree, p, "aaaa bbbb cccc dddd");
    tree.set_property(t, Property::WhiteSpace, "nowrap");
    run(&mut tree, 100.0);

    assert_eq!(line_count(&tree, p), 1);
    let last = tree.words(t).last().unwrap();
    assert!(last.right() > tree.client_right(p));
}

#[test]
fn test_wrapped_inline_box_has_one_rectangle_per_line() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let t = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);

    let rectangles = tree.get(t).unwrap().rectangles();
    assert_eq!(rectangles.len(), line_count(&tree, p));
    assert!(rectangles[1].1.top() > rectangles[0].1.top());
}

#[test]
fn test_relayout_at_new_width_rebuilds_lines() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let _ = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);
    assert!(line_count(&tree, p) >= 2);

    run(&mut tree, 1000.0);
    assert_eq!(line_count(&tree, p), 1);
    assert_eq!(tree.lines().len(), 1);
}

// ========== Alignment ==========

#[test]
fn test_centered_line_has_equal_gaps() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::TextAlign, "center");
    let t = text(&mut tree, p, "abc");
    run(&mut tree, 200.0);

    let word = &tree.words(t)[0];
    let left_gap = word.left - tree.client_left(p);
    let right_gap = tree.client_right(p) - word.right();
    assert!(left_gap > 0.0);
    assert!((left_gap - right_gap).abs() < 1e-3);
}

#[test]
fn test_right_aligned_line_ends_at_content_edge() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::TextAlign, "right");
    let t = text(&mut tree, p, "abc");
    run(&mut tree, 200.0);

    let word = &tree.words(t)[0];
    assert!((word.right() - tree.client_right(p)).abs() < 1e-3);
}

#[test]
fn test_justified_line_reaches_right_edge_with_uniform_gaps() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::TextAlign, "justify");
    let _ = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);

    let first_line = tree.get(p).unwrap().line_boxes()[0];
    let refs = tree.line(first_line).unwrap().words().to_vec();
    assert!(refs.len() >= 2);

    let words: Vec<_> = refs.iter().map(|r| tree.words(r.owner)[r.index].clone()).collect();
    let last = words.last().unwrap();
    assert!((last.right() - tree.client_right(p)).abs() < 1e-3);

    let gaps: Vec<f32> = words.windows(2).map(|w| w[1].left - w[0].right()).collect();
    for gap in &gaps {
        assert!((gap - gaps[0]).abs() < 1e-3, "gaps {gaps:?}");
    }
}

#[test]
fn test_last_justified_line_is_left_aligned() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::TextAlign, "justify");
    let t = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);

    let last = tree.words(t).last().unwrap();
    assert!(last.right() < tree.client_right(p));
}

#[test]
fn test_rtl_mirrors_words() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::Direction, "rtl");
    let t = text(&mut tree, p, "ab cd");
    run(&mut tree, 200.0);

    let words = tree.words(t);
    assert!((words[0].right() - tree.client_right(p)).abs() < 1e-3);
    assert!(words[2].left < words[0].left);
}

#[test]
fn test_text_indent_shifts_first_line_only() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    tree.set_property(p, Property::TextIndent, "20px");
    let t = text(&mut tree, p, "aaaa bbbb cccc dddd");
    run(&mut tree, 100.0);

    let words = tree.words(t);
    assert!((words[0].left - (tree.client_left(p) + 20.0)).abs() < 1e-3);
    let wrapped = words.iter().find(|w| w.top > words[0].top).unwrap();
    assert!((wrapped.left - tree.client_left(p)).abs() < 1e-3);
}

// ========== Vertical alignment ==========

#[test]
fn test_sub_drops_below_baseline_text() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let normal = text(&mut tree, p, "x");
    let sub = text(&mut tree, p, "y");
    tree.set_property(sub, Property::VerticalAlign, "sub");
    run(&mut tree, 200.0);

    assert!(tree.words(sub)[0].top > tree.words(normal)[0].top);
}

#[test]
fn test_unimplemented_vertical_align_keeps_flow_position() {
    for keyword in ["top", "bottom", "middle", "text-top", "text-bottom"] {
        let mut tree = BoxTree::new();
        let p = block(&mut tree, BoxId::ROOT);
        let big = text(&mut tree, p, "X");
        tree.set_property(big, Property::FontSize, "24pt");
        let small = text(&mut tree, p, "y");
        tree.set_property(small, Property::VerticalAlign, keyword);
        run(&mut tree, 200.0);

        let top = tree.words(small)[0].top;
        assert!(
            (top - tree.client_top(p)).abs() < 1e-3,
            "{keyword}: word moved to {top}"
        );
    }
}

#[test]
fn test_baseline_text_moves_down_next_to_larger_text() {
    let mut tree = BoxTree::new();
    let p = block(&mut tree, BoxId::ROOT);
    let big = text(&mut tree, p, "X");
    tree.set_property(big, Property::FontSize, "24pt");
    let small = text(&mut tree, p, "y");
    run(&mut tree, 200.0);

    assert!(tree.words(small)[0].top > tree.client_top(p) + 1.0);
}

// ========== Lists ==========

#[test]
fn test_decimal_marker_hangs_left_of_item() {
    let mut tree = BoxTree::new();
    let list = block(&mut tree, BoxId::ROOT);
    tree.set_property(list, Property::MarginLeft, "40px");
    let item = block(&mut tree, list);
    tree.set_property(item, Property::Display, "list-item");
    let _ = text(&mut tree, item, "first");
    let second = block(&mut tree, list);
    tree.set_property(second, Property::Display, "list-item");
    tree.set_property(second, Property::ListStyleType, "decimal");
    let _ = text(&mut tree, second, "second");
    run(&mut tree, 300.0);

    let marker = tree.get(second).unwrap().list_marker().unwrap();
    let word = &tree.words(marker)[0];
    assert_eq!(word.text(), "2.");
    assert!((word.right() - (tree.location(second).x - 5.0)).abs() < 1e-3);
}
