//! [CSS 2.1 § 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! A table is laid out in two phases. Analysis classifies the table's
//! children into rows and columns, fills the slots covered by row-spanning
//! cells with spacer boxes, and resolves one width per column. Placement
//! then walks the rows top to bottom, measuring every cell at its column
//! width and stretching each row's cells to a common bottom.
//!
//! Nothing of the analysis is kept between passes except the spacers: they
//! are inserted once per table box and the box remembers it.

use super::{LayoutContext, measure_bounds, words};
use crate::box_model::{Point, Side, Size};
use crate::boxes::{BoxId, BoxKind, BoxTree};
use crate::style::Property;
use crate::values::{Length, LengthUnit, parse_number};

/// Largest `colspan` and `<col span>` honored, as in HTML.
const MAX_COLSPAN: usize = 1000;
/// Largest `rowspan` honored, as in HTML.
const MAX_ROWSPAN: usize = 65534;

/// Rows and columns of one table, rebuilt every pass.
#[derive(Debug, Default)]
struct TableStructure {
    /// `<col>` boxes, one entry per spanned column.
    columns: Vec<BoxId>,
    header: Option<BoxId>,
    footer: Option<BoxId>,
    body_rows: Vec<BoxId>,
    /// Header rows, then body rows, then footer rows.
    all_rows: Vec<BoxId>,
}

/// Spacing between cells, and around the outer cells.
#[derive(Debug, Clone, Copy)]
struct Spacing {
    horizontal: f32,
    vertical: f32,
}

/// Lay out `table` and its cells, and set the table's right and bottom
/// edges.
pub(crate) fn layout_table(tree: &mut BoxTree, ctx: &mut LayoutContext<'_>, table: BoxId) {
    measure_words_deep(tree, ctx, table);

    // STEP 1: Classify children.
    let structure = classify(tree, table);

    // STEP 2: Fill the slots of row-spanning cells.
    if !tree.node(table).table_fixed {
        insert_row_span_spacers(tree, table, &structure.all_rows);
        tree.node_mut(table).table_fixed = true;
    }

    let spacing = spacing(tree, table);
    let (available, width_specified) = available_width(tree, table);

    // STEP 3: Column count.
    let column_count = if structure.columns.is_empty() {
        structure
            .all_rows
            .iter()
            .map(|&row| tree.children(row).len())
            .max()
            .unwrap_or(0)
    } else {
        structure.columns.len()
    };

    let available_cells = available
        - spacing.horizontal * (column_count + 1) as f32
        - tree.actual_border_width(table, Side::Left)
        - tree.actual_border_width(table, Side::Right);

    // STEP 4: Column widths.
    let declared = declared_column_widths(tree, &structure, column_count, available_cells);
    let mut widths = fill_missing_widths(
        tree,
        &structure,
        &declared,
        available_cells,
        width_specified,
    );

    // STEP 5: Shrink columns that overflow the table. The reducibility check
    // rejects every in-range column, so this never takes a step.
    let minimums = column_minimum_widths(tree, &structure.all_rows, column_count, spacing);
    shrink_columns(tree, table, &mut widths, &minimums, available, spacing);

    // STEP 6: No column narrower than its content allows.
    apply_minimum_widths(tree, &structure.all_rows, &mut widths, &minimums);

    // STEP 7: Place cells.
    tree.set_property(table, Property::Padding, "0");
    place_cells(tree, ctx, table, &structure.all_rows, &widths, spacing);
}

/// Measure the words of every box inside the table before any width is
/// resolved.
fn measure_words_deep(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    for child in tree.children(id).to_vec() {
        words::measure_words(tree, ctx, child);
        measure_words_deep(tree, ctx, child);
    }
}

/// [CSS 2.1 § 17.2 The CSS table model](https://www.w3.org/TR/CSS2/tables.html#table-display)
///
/// Only the first header and footer group are treated as such; any later
/// one is taken as an ordinary row.
fn classify(tree: &mut BoxTree, table: BoxId) -> TableStructure {
    let mut structure = TableStructure::default();

    for child in tree.children(table).to_vec() {
        remove_anonymous_spaces(tree, child);

        match tree.display(child) {
            "table-column" => {
                for _ in 0..span(tree, child) {
                    structure.columns.push(child);
                }
            }
            "table-column-group" => {
                let cols = tree.children(child).to_vec();
                if cols.is_empty() {
                    for _ in 0..span(tree, child) {
                        structure.columns.push(child);
                    }
                } else {
                    for col in cols {
                        for _ in 0..span(tree, col) {
                            structure.columns.push(col);
                        }
                    }
                }
            }
            "table-header-group" if structure.header.is_none() => structure.header = Some(child),
            "table-footer-group" if structure.footer.is_none() => structure.footer = Some(child),
            "table-header-group" | "table-footer-group" | "table-row" => {
                structure.body_rows.push(child);
            }
            "table-row-group" => {
                for row in tree.children(child).to_vec() {
                    if tree.display(row) == "table-row" {
                        structure.body_rows.push(row);
                    }
                }
            }
            // Captions are not laid out.
            _ => {}
        }
    }

    if let Some(header) = structure.header {
        structure.all_rows.extend_from_slice(tree.children(header));
    }
    structure.all_rows.extend_from_slice(&structure.body_rows);
    if let Some(footer) = structure.footer {
        structure.all_rows.extend_from_slice(tree.children(footer));
    }

    for &row in &structure.all_rows {
        remove_anonymous_spaces(tree, row);
    }

    structure
}

fn remove_anonymous_spaces(tree: &mut BoxTree, id: BoxId) {
    for child in tree.children(id).to_vec() {
        if tree.kind(child).is_anonymous_space() {
            tree.remove_child(id, child);
        }
    }
}

/// [CSS 2.1 § 17.5 Visual layout of table contents](https://www.w3.org/TR/CSS2/tables.html#table-layout)
///
/// "Cells may span several rows or columns." A cell with `rowspan > 1`
/// leaves a spacer at its real column in each of the rows below it that it
/// covers, so every row counts the same grid slots.
fn insert_row_span_spacers(tree: &mut BoxTree, table: BoxId, rows: &[BoxId]) {
    for (current_row, &row) in rows.iter().enumerate() {
        for cell in tree.children(row).to_vec() {
            let rowspan = rowspan(tree, cell);
            let real_column = real_column_index(tree, row, cell);

            let spanned_rows = rows
                .iter()
                .take(current_row.saturating_add(rowspan))
                .skip(current_row + 1);
            for &spanned in spanned_rows {
                let mut column = real_column;
                let mut slot = 0;
                let siblings = tree.children(spanned).to_vec();
                while slot <= siblings.len() {
                    if slot == column {
                        let spacer = create_spacer(tree, table, cell, current_row, rowspan);
                        tree.insert_child_at(spanned, slot, spacer);
                        break;
                    }
                    let Some(&sibling) = siblings.get(slot) else {
                        break;
                    };
                    column = column.saturating_sub(colspan(tree, sibling) - 1);
                    slot += 1;
                }
            }
        }
    }
}

fn create_spacer(
    tree: &mut BoxTree,
    table: BoxId,
    extended: BoxId,
    start_row: usize,
    rowspan: usize,
) -> BoxId {
    let spacer = tree.create_box(
        BoxKind::TableSpacer {
            extended,
            start_row,
            end_row: start_row.saturating_add(rowspan - 1),
        },
        None,
    );
    tree.inherit_style(spacer, table, false);
    tree.set_property(spacer, Property::Display, "none");
    spacer
}

/// [CSS 2.1 § 17.6.1 The separated borders model](https://www.w3.org/TR/CSS2/tables.html#separated-borders)
///
/// Collapsed borders leave no gap, signalled by a spacing of -1.
fn spacing(tree: &BoxTree, table: BoxId) -> Spacing {
    if tree.property(table, Property::BorderCollapse) == "collapse" {
        return Spacing {
            horizontal: -1.0,
            vertical: -1.0,
        };
    }
    let (horizontal, vertical) = tree.actual_border_spacing(table);
    Spacing {
        horizontal,
        vertical,
    }
}

/// The width the table may take, and whether it was declared.
///
/// A positive declared width wins (percentages of the parent's content
/// width); otherwise the parent's content width, or the table's own width
/// when it has no parent.
fn available_width(tree: &BoxTree, table: BoxId) -> (f32, bool) {
    let parent_width = tree
        .parent(table)
        .map_or_else(|| tree.size(table).width, |p| tree.available_width(p));

    let declared = tree.property(table, Property::Width);
    let length = Length::parse(declared);
    if length.number() > 0.0 {
        let width = if length.is_percentage() {
            parse_number(declared, parent_width)
        } else {
            length.number()
        };
        return (width, true);
    }
    (parent_width, false)
}

/// A positive declared width, in pixels: percentages are taken of
/// `hundred_percent`; pixel and unit-less numbers are taken as is.
fn declared_width(tree: &BoxTree, id: BoxId, hundred_percent: f32) -> Option<f32> {
    let declared = tree.property(id, Property::Width);
    let length = Length::parse(declared);
    if length.number() <= 0.0 {
        return None;
    }
    if length.is_percentage() {
        Some(parse_number(declared, hundred_percent))
    } else if matches!(length.unit(), LengthUnit::Px | LengthUnit::None) {
        Some(length.number())
    } else {
        None
    }
}

/// [CSS 2.1 § 17.5.2.2 Automatic table layout](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
///
/// Widths declared by `<col>` elements or, failing those, by cells. A cell
/// spanning several columns shares its width evenly among them. The cell
/// scan goes by child position, not real column.
fn declared_column_widths(
    tree: &BoxTree,
    structure: &TableStructure,
    column_count: usize,
    available_cells: f32,
) -> Vec<Option<f32>> {
    let mut widths = vec![None; column_count];

    if !structure.columns.is_empty() {
        for (width, &col) in widths.iter_mut().zip(&structure.columns) {
            if let Some(w) = declared_width(tree, col, available_cells) {
                *width = Some(w);
            }
        }
        return widths;
    }

    for &row in &structure.all_rows {
        let cells = tree.children(row);
        for i in 0..column_count {
            let Some(&cell) = cells.get(i) else {
                break;
            };
            if widths[i].is_some() || tree.display(cell) != "table-cell" {
                continue;
            }
            let Some(width) = declared_width(tree, cell, available_cells) else {
                continue;
            };
            let colspan = colspan(tree, cell);
            let share = width / colspan as f32;
            for w in widths.iter_mut().skip(i).take(colspan) {
                *w = Some(share);
            }
        }
    }

    widths
}

/// Resolve the columns no declaration sized.
///
/// A table with a declared width shares what is left of it evenly. Any
/// other table sizes each such column to its widest unwrapped single-column
/// cell.
fn fill_missing_widths(
    tree: &BoxTree,
    structure: &TableStructure,
    widths: &[Option<f32>],
    available_cells: f32,
    width_specified: bool,
) -> Vec<f32> {
    if width_specified {
        let missing = widths.iter().filter(|w| w.is_none()).count();
        let occupied: f32 = widths.iter().flatten().sum();
        let share = (available_cells - occupied) / missing.max(1) as f32;
        return widths.iter().map(|w| w.unwrap_or(share)).collect();
    }

    let mut full_widths = vec![0.0_f32; widths.len()];
    for &row in &structure.all_rows {
        for &cell in tree.children(row) {
            let column = real_column_index(tree, row, cell);
            if column < widths.len() && widths[column].is_none() && colspan(tree, cell) == 1 {
                full_widths[column] = full_widths[column].max(tree.full_width(cell));
            }
        }
    }

    widths
        .iter()
        .zip(full_widths)
        .map(|(w, full)| w.unwrap_or(full))
        .collect()
}

/// For each column, the width its cells need at least: a cell's minimum
/// width less what the other columns of its span already provide is
/// charged to its last spanned column.
fn column_minimum_widths(
    tree: &BoxTree,
    rows: &[BoxId],
    column_count: usize,
    spacing: Spacing,
) -> Vec<f32> {
    let mut minimums = vec![0.0_f32; column_count];

    for &row in rows {
        for &cell in tree.children(row) {
            let colspan = colspan(tree, cell);
            let column = real_column_index(tree, row, cell);
            let affected = column.saturating_add(colspan - 1);
            if affected >= column_count {
                continue;
            }
            let spanned: f32 = minimums[column..affected].iter().sum::<f32>()
                + (colspan - 1) as f32 * spacing.horizontal;
            minimums[affected] = minimums[affected].max(tree.minimum_width(cell) - spanned);
        }
    }

    minimums
}

/// Total width the columns take with spacing and table borders.
fn width_sum(tree: &BoxTree, table: BoxId, widths: &[f32], spacing: Spacing) -> f32 {
    widths.iter().sum::<f32>()
        + spacing.horizontal * (widths.len() + 1) as f32
        + tree.actual_border_width(table, Side::Left)
        + tree.actual_border_width(table, Side::Right)
}

/// Whether column `index` may lose width. The bounds test is inverted, so
/// this holds for no column in range.
fn can_reduce_width(widths: &[f32], minimums: &[f32], index: usize) -> bool {
    if widths.len() >= index || minimums.len() >= index {
        return false;
    }
    matches!((widths.get(index), minimums.get(index)), (Some(w), Some(m)) if w > m)
}

/// Take one pixel at a time from reducible columns, round-robin, while the
/// table is wider than allowed.
fn shrink_columns(
    tree: &BoxTree,
    table: BoxId,
    widths: &mut [f32],
    minimums: &[f32],
    available: f32,
    spacing: Spacing,
) {
    let any_reducible =
        |widths: &[f32]| (0..widths.len()).any(|i| can_reduce_width(widths, minimums, i));

    let mut column = 0;
    while width_sum(tree, table, widths, spacing) > available && any_reducible(widths) {
        while !can_reduce_width(widths, minimums, column) {
            column = (column + 1) % widths.len();
        }
        widths[column] -= 1.0;
        column = (column + 1) % widths.len();
    }
}

/// Grow every column that is narrower than its minimum and take the
/// difference from the column after it.
fn apply_minimum_widths(tree: &BoxTree, rows: &[BoxId], widths: &mut [f32], minimums: &[f32]) {
    let count = widths.len();
    for &row in rows {
        for &cell in tree.children(row) {
            let column = real_column_index(tree, row, cell);
            let affected = column.saturating_add(colspan(tree, cell) - 1);
            if affected >= count {
                continue;
            }
            if widths[column] < minimums[column] {
                let diff = minimums[column] - widths[column];
                widths[affected] = minimums[affected];
                if column + 1 < count {
                    widths[column + 1] -= diff;
                }
            }
        }
    }
}

/// [CSS 2.1 § 17.5.3 Table height algorithms](https://www.w3.org/TR/CSS2/tables.html#height-layout)
///
/// Cells of a row start at the same top. Once the row is measured, every
/// cell whose span ends on it is stretched to the lowest bottom reached so
/// far. A cell spanning several rows only counts on its last one.
fn place_cells(
    tree: &mut BoxTree,
    ctx: &mut LayoutContext<'_>,
    table: BoxId,
    rows: &[BoxId],
    widths: &[f32],
    spacing: Spacing,
) {
    let start_x = tree.client_left(table) + spacing.horizontal;
    let start_y = tree.client_top(table) + spacing.vertical;
    let mut y = start_y;
    let mut max_right = start_x;
    let mut max_bottom = start_y;

    for (current_row, &row) in rows.iter().enumerate() {
        let mut x = start_x;
        let cells = tree.children(row).to_vec();

        for (column, &cell) in cells.iter().enumerate() {
            if column >= widths.len() {
                break;
            }
            let width = cell_width(tree, row, cell, widths, spacing);
            tree.set_location(cell, Point::new(x, y));
            tree.set_size(cell, Size::new(width, 0.0));
            measure_bounds(tree, ctx, cell);

            match tree.kind(cell) {
                BoxKind::TableSpacer {
                    extended, end_row, ..
                } => {
                    if end_row == current_row {
                        max_bottom = max_bottom.max(tree.actual_bottom(extended));
                    }
                }
                _ if rowspan(tree, cell) == 1 => {
                    max_bottom = max_bottom.max(tree.actual_bottom(cell));
                }
                _ => {}
            }
            max_right = max_right.max(tree.actual_right(cell));
            x = tree.actual_right(cell) + spacing.horizontal;
        }

        for &cell in &cells {
            match tree.kind(cell) {
                BoxKind::TableSpacer {
                    extended, end_row, ..
                } if end_row == current_row => {
                    tree.set_actual_bottom(extended, max_bottom);
                    apply_cell_vertical_alignment(tree, extended);
                }
                BoxKind::TableSpacer { .. } => {}
                _ if rowspan(tree, cell) == 1 => {
                    tree.set_actual_bottom(cell, max_bottom);
                    apply_cell_vertical_alignment(tree, cell);
                }
                _ => {}
            }
        }

        y = max_bottom + spacing.vertical;
    }

    tree.set_actual_right(
        table,
        max_right + spacing.horizontal + tree.actual_border_width(table, Side::Right),
    );
    tree.set_actual_bottom(
        table,
        max_bottom + spacing.vertical + tree.actual_border_width(table, Side::Bottom),
    );
}

/// [CSS 2.1 § 17.5.4 Horizontal alignment in a column](https://www.w3.org/TR/CSS2/tables.html#column-alignment)
///
/// `top` and `baseline` leave the content where it is; `bottom` moves it
/// down until it touches the cell's content bottom, `middle` half as far.
fn apply_cell_vertical_alignment(tree: &mut BoxTree, cell: BoxId) {
    let align = tree.property(cell, Property::VerticalAlign);
    let bottom_aligned = align == "bottom";
    if !bottom_aligned && align != "middle" {
        return;
    }

    let gap = tree.client_bottom(cell) - tree.maximum_bottom(cell, 0.0);
    let distance = if bottom_aligned { gap } else { gap / 2.0 };

    for child in tree.children(cell).to_vec() {
        tree.offset_top(child, distance);
    }
}

/// Width of `cell`: its spanned columns plus the spacing between them.
fn cell_width(tree: &BoxTree, row: BoxId, cell: BoxId, widths: &[f32], spacing: Spacing) -> f32 {
    let column = real_column_index(tree, row, cell);
    let colspan = colspan(tree, cell);
    let sum: f32 = widths.iter().skip(column).take(colspan).sum();
    sum + (colspan - 1) as f32 * spacing.horizontal
}

/// The grid column `cell` starts at: the sum of the spans of the cells
/// before it in `row`.
fn real_column_index(tree: &BoxTree, row: BoxId, cell: BoxId) -> usize {
    tree.children(row)
        .iter()
        .take_while(|&&c| c != cell)
        .map(|&c| colspan(tree, c))
        .fold(0, usize::saturating_add)
}

/// `colspan` of a cell; a spacer spans as many columns as the cell it
/// stands for.
fn colspan(tree: &BoxTree, cell: BoxId) -> usize {
    match tree.kind(cell) {
        BoxKind::TableSpacer { extended, .. } => {
            span_attribute(tree, extended, "colspan", MAX_COLSPAN)
        }
        _ => span_attribute(tree, cell, "colspan", MAX_COLSPAN),
    }
}

fn rowspan(tree: &BoxTree, cell: BoxId) -> usize {
    span_attribute(tree, cell, "rowspan", MAX_ROWSPAN)
}

/// A positive integer attribute, 1 when absent or malformed, and at most
/// `max`. Values too large for `usize` are taken as `max`.
fn span_attribute(tree: &BoxTree, id: BoxId, name: &str, max: usize) -> usize {
    let Some(value) = tree.tag(id).and_then(|t| t.attribute(name)).map(str::trim) else {
        return 1;
    };
    match value.parse::<usize>() {
        Ok(n) => n.clamp(1, max),
        Err(_) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => max,
        Err(_) => 1,
    }
}

/// `span` of a `<col>` or `<colgroup>`, at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn span(tree: &BoxTree, id: BoxId) -> usize {
    let declared = tree.tag(id).and_then(|t| t.attribute("span")).unwrap_or("1");
    let value = parse_number(declared, 1.0).round();
    if value >= MAX_COLSPAN as f32 {
        MAX_COLSPAN
    } else if value >= 1.0 {
        value as usize
    } else {
        1
    }
}
