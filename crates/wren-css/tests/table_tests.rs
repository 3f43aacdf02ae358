//! Integration tests for table layout.

use wren_common::resource::NullResolver;
use wren_css::{
    ApproximateFontMetrics, BoxId, BoxKind, BoxTree, ContainerOptions, InitialContainer, Side,
    Size,
};

fn measured(document: &str, width: f32) -> InitialContainer {
    let mut container =
        InitialContainer::from_document(document, ContainerOptions::default(), Box::new(NullResolver));
    container.measure(&ApproximateFontMetrics, Size::new(width, 400.0));
    container
}

/// Every box with tag `name`, in document order.
fn find_all(tree: &BoxTree, name: &str) -> Vec<BoxId> {
    let mut found = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        if tree.tag_name(id) == name {
            found.push(id);
        }
        stack.extend(tree.children(id).iter().rev().copied());
    }
    found
}

fn is_spacer(tree: &BoxTree, id: BoxId) -> bool {
    matches!(tree.kind(id), BoxKind::TableSpacer { .. })
}

// ========== Column widths ==========

#[test]
fn test_colspan_cell_covers_both_columns() {
    let c = measured(
        "<table cellspacing=0><tr><td colspan=2>A</td></tr><tr><td>B</td><td>C</td></tr></table>",
        100.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");
    let (a, b, cc) = (cells[0], cells[1], cells[2]);

    assert!((tree.location(a).x - tree.location(b).x).abs() < 1e-3);
    assert!((tree.actual_right(a) - tree.actual_right(cc)).abs() < 1e-3);
    let spanned = tree.size(b).width + tree.size(cc).width;
    assert!((tree.size(a).width - spanned).abs() < 1e-3);
}

#[test]
fn test_cells_of_a_row_share_top_and_bottom() {
    let c = measured(
        "<table><tr><td>short</td><td>a much longer cell that has to wrap</td></tr></table>",
        120.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");

    assert!((tree.location(cells[0]).y - tree.location(cells[1]).y).abs() < 1e-3);
    assert!((tree.actual_bottom(cells[0]) - tree.actual_bottom(cells[1])).abs() < 1e-3);
}

#[test]
fn test_border_spacing_separates_cells() {
    let c = measured("<table cellspacing=5><tr><td>x</td><td>y</td></tr></table>", 300.0);
    let tree = c.tree();
    let cells = find_all(tree, "td");
    let gap = tree.location(cells[1]).x - tree.actual_right(cells[0]);
    assert!((gap - 5.0).abs() < 1e-3);
}

#[test]
fn test_declared_table_width_is_shared_by_columns() {
    let c = measured(
        "<table width=200 cellspacing=0><tr><td>x</td><td>y</td></tr></table>",
        400.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");
    assert!((tree.size(cells[0]).width - 100.0).abs() < 1e-3);
    assert!((tree.size(cells[1]).width - 100.0).abs() < 1e-3);
}

// ========== Minimum widths ==========

#[test]
fn test_unbreakable_word_widens_its_column() {
    let c = measured(
        "<table cellspacing=0><tr><td width=10>abcdefghij</td></tr></table>",
        300.0,
    );
    let tree = c.tree();
    let cell = find_all(tree, "td")[0];
    let text = tree.children(cell)[0];
    let word = tree.words(text)[0].width;
    let insets = tree.actual_padding(cell, Side::Left)
        + tree.actual_padding(cell, Side::Right)
        + tree.actual_border_width(cell, Side::Left)
        + tree.actual_border_width(cell, Side::Right);

    assert!(tree.size(cell).width >= word + insets - 1e-3);
}

// ========== Row spans ==========

#[test]
fn test_rowspan_leaves_a_spacer_in_the_next_row() {
    let c = measured(
        "<table><tr><td rowspan=2>A</td><td>B</td></tr><tr><td>C</td></tr></table>",
        300.0,
    );
    let tree = c.tree();
    let rows = find_all(tree, "tr");
    let second = tree.children(rows[1]);

    assert_eq!(second.len(), 2);
    assert!(is_spacer(tree, second[0]));
    assert_eq!(tree.tag_name(second[1]), "td");
}

#[test]
fn test_spacers_are_inserted_once() {
    let mut c = measured(
        "<table><tr><td rowspan=2>A</td><td>B</td></tr><tr><td>C</td></tr></table>",
        300.0,
    );
    c.measure(&ApproximateFontMetrics, Size::new(200.0, 400.0));
    c.measure(&ApproximateFontMetrics, Size::new(300.0, 400.0));

    let tree = c.tree();
    let rows = find_all(tree, "tr");
    let spacers = tree
        .children(rows[1])
        .iter()
        .filter(|&&id| is_spacer(tree, id))
        .count();
    assert_eq!(spacers, 1);
}

#[test]
fn test_row_spanning_cell_reaches_last_row() {
    let c = measured(
        "<table><tr><td rowspan=2>A</td><td>B</td></tr><tr><td>C</td></tr></table>",
        300.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");
    let (a, cc) = (cells[0], cells[2]);

    assert!((tree.actual_bottom(a) - tree.actual_bottom(cc)).abs() < 1e-3);
    assert!(tree.location(cc).x > tree.actual_right(a) - 1e-3);
}

// ========== Oversized spans ==========

#[test]
fn test_huge_colspan_is_clamped() {
    let c = measured(
        "<table><tr><td>a</td><td colspan=18446744073709551615>b</td></tr></table>",
        200.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");

    assert_eq!(cells.len(), 2);
    assert!(tree.size(cells[0]).width > 0.0);
    assert!(tree.location(cells[1]).x >= tree.actual_right(cells[0]));
}

#[test]
fn test_colspan_beyond_usize_is_clamped() {
    let c = measured(
        "<table><tr><td colspan=99999999999999999999999>a</td><td>b</td></tr></table>",
        200.0,
    );
    let tree = c.tree();
    assert_eq!(find_all(tree, "td").len(), 2);
    assert!(c.maximum_size().width.is_finite());
}

#[test]
fn test_huge_rowspan_is_clamped() {
    let c = measured(
        "<table><tr><td>a</td></tr><tr><td rowspan=18446744073709551615>b</td></tr>\
         <tr><td>c</td></tr></table>",
        200.0,
    );
    let tree = c.tree();
    let rows = find_all(tree, "tr");
    let spacers = tree
        .children(rows[2])
        .iter()
        .filter(|&&id| is_spacer(tree, id))
        .count();

    assert_eq!(spacers, 1);
    let b = find_all(tree, "td")[1];
    assert!(tree.actual_bottom(b) >= tree.location(b).y);
}

#[test]
fn test_huge_col_span_is_bounded() {
    let c = measured(
        "<table><col span=18446744073709551615><tr><td>a</td></tr></table>",
        200.0,
    );
    let tree = c.tree();
    let td = find_all(tree, "td")[0];
    assert!(tree.size(td).width >= 0.0);
    assert!(c.maximum_size().width.is_finite());
}

// ========== Structure ==========

#[test]
fn test_rows_inside_tbody_are_laid_out() {
    let c = measured(
        "<table><tbody><tr><td>x</td></tr><tr><td>y</td></tr></tbody></table>",
        300.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");
    assert!(tree.location(cells[1]).y > tree.location(cells[0]).y);
}

#[test]
fn test_header_rows_come_first() {
    let c = measured(
        "<table><tfoot><tr><td>f</td></tr></tfoot><thead><tr><td>h</td></tr></thead><tr><td>b</td></tr></table>",
        300.0,
    );
    let tree = c.tree();
    let cells = find_all(tree, "td");
    let (foot, head, body) = (cells[0], cells[1], cells[2]);

    assert!(tree.location(head).y < tree.location(body).y);
    assert!(tree.location(body).y < tree.location(foot).y);
}

#[test]
fn test_table_encloses_its_cells() {
    let c = measured("<table border=1><tr><td>x</td><td>y</td></tr></table>", 300.0);
    let tree = c.tree();
    let table = find_all(tree, "table")[0];
    for cell in find_all(tree, "td") {
        assert!(tree.actual_right(cell) <= tree.actual_right(table) + 1e-3);
        assert!(tree.actual_bottom(cell) <= tree.actual_bottom(table) + 1e-3);
    }
}
