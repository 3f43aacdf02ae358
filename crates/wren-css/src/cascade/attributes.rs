//! [WHATWG HTML § 15.2 The CSS user agent style sheet and presentational hints](https://html.spec.whatwg.org/multipage/rendering.html#presentational-hints)
//!
//! Presentational HTML attributes translated into CSS declarations.
//! Unit-less lengths (`width=100`) become pixel lengths.

use crate::boxes::{BoxId, BoxTree};
use crate::style::Property;
use crate::values::{parse_length, translate_length};

/// Assign the CSS equivalent of every presentational attribute of `id`.
pub(crate) fn translate_attributes(tree: &mut BoxTree, id: BoxId) {
    let Some(tag) = tree.tag(id) else {
        return;
    };
    let is_table = tag.name() == "table";
    let is_rule = tag.name() == "hr";
    let attributes: Vec<(String, String)> = tag
        .attributes()
        .iter()
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect();

    for (name, value) in attributes {
        match name.as_str() {
            "align" => {
                if matches!(value.as_str(), "left" | "center" | "right" | "justify") {
                    tree.set_property(id, Property::TextAlign, &value);
                } else {
                    tree.set_property(id, Property::VerticalAlign, &value);
                }
            }
            "background" => tree.set_property(id, Property::BackgroundImage, &value),
            "bgcolor" => tree.set_property(id, Property::BackgroundColor, &value),
            "border" => apply_border(tree, id, &value, is_table),
            "bordercolor" => tree.set_property(id, Property::BorderColor, &value),
            "cellspacing" => {
                tree.set_property(id, Property::BorderSpacing, &translate_length(&value));
            }
            "cellpadding" => {
                let padding = translate_length(&value);
                for cell in table_cells(tree, id) {
                    tree.set_property(cell, Property::Padding, &padding);
                }
            }
            "color" => tree.set_property(id, Property::Color, &value),
            "dir" => tree.set_property(id, Property::Direction, &value),
            "face" => tree.set_property(id, Property::FontFamily, &value),
            "height" => tree.set_property(id, Property::Height, &translate_length(&value)),
            "hspace" => {
                let margin = translate_length(&value);
                tree.set_property(id, Property::MarginLeft, &margin);
                tree.set_property(id, Property::MarginRight, &margin);
            }
            "nowrap" => tree.set_property(id, Property::WhiteSpace, "nowrap"),
            "size" if is_rule => tree.set_property(id, Property::Height, &translate_length(&value)),
            "valign" => tree.set_property(id, Property::VerticalAlign, &value),
            "vspace" => {
                let margin = translate_length(&value);
                tree.set_property(id, Property::MarginTop, &margin);
                tree.set_property(id, Property::MarginBottom, &margin);
            }
            "width" => tree.set_property(id, Property::Width, &translate_length(&value)),
            _ => {}
        }
    }
}

/// [WHATWG HTML § 15.3.10 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
///
/// "When a table element has a border attribute whose value, when parsed
/// using the rules for parsing non-negative integers, is found to be
/// greater than zero, the user agent is expected to use the parsed value
/// for eight presentational hints."
///
/// On a table, the width also goes to every cell, `outset` on the table and
/// `inset` on the cells. Any other element gets a solid border.
fn apply_border(tree: &mut BoxTree, id: BoxId, value: &str, is_table: bool) {
    let width = translate_length(value);
    tree.set_property(id, Property::BorderWidth, &width);

    if !is_table {
        tree.set_property(id, Property::BorderStyle, "solid");
        return;
    }

    if parse_length(&width, 0.0, 0.0) <= 0.0 {
        return;
    }
    tree.set_property(id, Property::BorderStyle, "outset");
    for cell in table_cells(tree, id) {
        tree.set_property(cell, Property::BorderWidth, &width);
        tree.set_property(cell, Property::BorderStyle, "inset");
    }
}

/// The `td` and `th` boxes belonging to `table`: its descendants, without
/// descending into nested tables.
fn table_cells(tree: &BoxTree, table: BoxId) -> Vec<BoxId> {
    let mut cells = Vec::new();
    let mut stack: Vec<BoxId> = tree.children(table).iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        match tree.tag_name(id) {
            "td" | "th" => cells.push(id),
            "table" => {}
            _ => stack.extend(tree.children(id).iter().rev().copied()),
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use wren_html::Tag;

    use super::*;
    use crate::boxes::BoxKind;
    use crate::box_model::Side;

    fn tagged(tree: &mut BoxTree, parent: BoxId, raw: &str) -> BoxId {
        let id = tree.create_box(BoxKind::Normal, Some(Tag::parse(raw)));
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_table_border_reaches_cells_but_not_nested_tables() {
        let mut tree = BoxTree::new();
        let table = tagged(&mut tree, BoxId::ROOT, "<table border=2>");
        let row = tagged(&mut tree, table, "<tr>");
        let cell = tagged(&mut tree, row, "<td>");
        let nested = tagged(&mut tree, cell, "<table>");
        let nested_row = tagged(&mut tree, nested, "<tr>");
        let nested_cell = tagged(&mut tree, nested_row, "<td>");

        translate_attributes(&mut tree, table);

        assert!((tree.actual_border_width(cell, Side::Left) - 2.0).abs() < f32::EPSILON);
        assert_eq!(tree.property(table, Property::BorderTopStyle), "outset");
        assert_eq!(tree.property(nested_cell, Property::BorderTopStyle), "none");
    }

    #[test]
    fn test_align_keyword_or_vertical() {
        let mut tree = BoxTree::new();
        let p = tagged(&mut tree, BoxId::ROOT, "<p align=center>");
        let td = tagged(&mut tree, BoxId::ROOT, "<td align=middle width=40>");
        translate_attributes(&mut tree, p);
        translate_attributes(&mut tree, td);
        assert_eq!(tree.property(p, Property::TextAlign), "center");
        assert_eq!(tree.property(td, Property::VerticalAlign), "middle");
        assert_eq!(tree.property(td, Property::Width), "40px");
    }
}
