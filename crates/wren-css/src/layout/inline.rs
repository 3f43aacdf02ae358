//! [CSS 2.1 § 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! A block whose children are all inline flows the words of its whole
//! subtree into line boxes, left to right, wrapping at its right content
//! edge. Each line is then aligned horizontally (`text-align`) and
//! vertically (`vertical-align`), mirrored for `direction: rtl`, and the
//! per-line fragments of every inline box are recorded.

use super::line_box::{LineId, WordRef};
use super::{LayoutContext, words};
use crate::box_model::{Rect, Side};
use crate::boxes::{BoxId, BoxTree};
use crate::style::Property;

/// Pen state while flowing one block.
struct Flow {
    /// Left content edge; where wrapped lines start.
    start_x: f32,
    /// Right content edge; words may not cross it.
    max_right: f32,
    x: f32,
    y: f32,
    /// Lowest word bottom so far; the next line starts here.
    max_bottom: f32,
    line: LineId,
}

/// Flow the inline content of `block` into line boxes and set the block's
/// bottom edge below the last line.
pub(crate) fn create_line_boxes(tree: &mut BoxTree, ctx: &LayoutContext<'_>, block: BoxId) {
    tree.node_mut(block).line_boxes.clear();

    let start_x = tree.client_left(block);
    let start_y = tree.client_top(block);
    let line = tree.new_line(block);
    let mut flow = Flow {
        start_x,
        max_right: tree.client_right(block),
        x: start_x + tree.actual_text_indent(block),
        y: start_y,
        max_bottom: start_y,
        line,
    };

    // STEP 1: Place every word.
    flow_box(tree, ctx, block, block, &mut flow);

    // STEP 2: Align each line and record box fragments.
    let rtl = tree.property(block, Property::Direction) == "rtl";
    for line in tree.node(block).line_boxes.clone() {
        apply_horizontal_alignment(tree, block, line);
        bubble_rectangles(tree, block, line);
        apply_vertical_alignment(tree, ctx, block, line);
        if rtl {
            apply_right_to_left(tree, block, line);
        }
        tree.lines[line.0].clear_rectangles();
        bubble_rectangles(tree, block, line);
        assign_rectangles(tree, line);
    }

    // STEP 3: The block ends below the last line.
    let bottom = flow.max_bottom
        + tree.actual_padding(block, Side::Bottom)
        + tree.actual_border_width(block, Side::Bottom);
    tree.set_actual_bottom(block, bottom);
}

/// Place the words of every inline descendant of `current`.
///
/// A word wraps to a new line when it would cross the right content edge
/// (unless `white-space: nowrap`, and never onto an empty line) or when it
/// is a line break. An inline box's left inset (margin, border, padding) is
/// added before its first word and its right inset after its last.
fn flow_box(tree: &mut BoxTree, ctx: &LayoutContext<'_>, block: BoxId, current: BoxId, flow: &mut Flow) {
    tree.node_mut(current).first_hosting_line = Some(flow.line);

    for child in tree.children(current).to_vec() {
        let left_spacing = tree.actual_margin(child, Side::Left)
            + tree.actual_border_width(child, Side::Left)
            + tree.actual_padding(child, Side::Left);
        let right_spacing = tree.actual_margin(child, Side::Right)
            + tree.actual_border_width(child, Side::Right)
            + tree.actual_padding(child, Side::Right);

        tree.node_mut(child).rectangles.clear();
        words::measure_words(tree, ctx, child);

        flow.x += left_spacing;

        if tree.words(child).is_empty() {
            flow_box(tree, ctx, block, child, flow);
        } else {
            let nowrap = tree.property(child, Property::WhiteSpace) == "nowrap";
            for index in 0..tree.words(child).len() {
                let word = &tree.words(child)[index];
                let line_has_words = !tree.lines[flow.line.0].words().is_empty();
                let overflows = !nowrap && flow.x + word.width + right_spacing > flow.max_right;

                if (overflows && line_has_words) || word.is_line_break() {
                    let is_image = word.is_image();
                    flow.x = flow.start_x;
                    flow.y = flow.max_bottom;
                    flow.line = tree.new_line(block);
                    if is_image || index == 0 {
                        flow.x += left_spacing;
                    }
                }

                tree.lines[flow.line.0].report_word(WordRef { owner: child, index });
                let word = &mut tree.node_mut(child).words[index];
                word.left = flow.x;
                word.top = flow.y;
                flow.x = word.right();
                flow.max_bottom = flow.max_bottom.max(word.bottom());
            }
        }

        flow.x += right_spacing;
    }

    tree.node_mut(current).last_hosting_line = Some(flow.line);
}

/// Every word placed on `line`, resolved against its owner.
fn line_words(tree: &BoxTree, line: LineId) -> Vec<WordRef> {
    tree.lines[line.0].words().to_vec()
}

fn shift_words(tree: &mut BoxTree, refs: &[WordRef], dx: f32) {
    for r in refs {
        tree.node_mut(r.owner).words[r.index].left += dx;
    }
}

/// [CSS 2.1 § 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// "This property describes how inline-level content of a block container
/// is aligned."
fn apply_horizontal_alignment(tree: &mut BoxTree, block: BoxId, line: LineId) {
    match tree.property(block, Property::TextAlign) {
        "right" => align_right_or_center(tree, block, line, false),
        "center" => align_right_or_center(tree, block, line, true),
        "justify" => justify(tree, block, line),
        _ => {}
    }
}

/// Shift the whole line so its last word ends at the right content edge,
/// or half that distance for `center`.
fn align_right_or_center(tree: &mut BoxTree, block: BoxId, line: LineId, center: bool) {
    let refs = line_words(tree, line);
    let Some(last) = refs.last() else {
        return;
    };

    let last_word = &tree.words(last.owner)[last.index];
    let mut diff = tree.client_right(block)
        - last_word.right()
        - tree.actual_border_width(last.owner, Side::Right)
        - tree.actual_padding(last.owner, Side::Right);
    if center {
        diff /= 2.0;
    }

    if diff > 0.0 {
        shift_words(tree, &refs, diff);
    }
}

/// "Conforming user agents may interpret the value 'justify' as 'left' or
/// 'right', depending on whether the element's default writing direction
/// is left-to-right or right-to-left, respectively."
///
/// Here every line but the last is stretched to the content width by
/// spreading the leftover space evenly between its words, and the last word
/// is pinned to the right content edge. The first line keeps its
/// `text-indent`.
fn justify(tree: &mut BoxTree, block: BoxId, line: LineId) {
    let lines = &tree.node(block).line_boxes;
    if lines.last() == Some(&line) {
        return;
    }
    let indent = if lines.first() == Some(&line) {
        tree.actual_text_indent(block)
    } else {
        0.0
    };

    let refs = line_words(tree, line);
    if refs.is_empty() {
        return;
    }

    let text_sum: f32 = refs
        .iter()
        .map(|r| tree.words(r.owner)[r.index].width)
        .sum();
    let available = tree.client_rectangle(block).width - indent;
    let gaps = refs.len().saturating_sub(1).max(1);
    let spacing = (available - text_sum) / gaps as f32;

    let client_left = tree.client_left(block);
    let client_right = tree.client_right(block);
    let mut x = client_left + indent;
    for (i, r) in refs.iter().enumerate() {
        let word = &mut tree.node_mut(r.owner).words[r.index];
        word.left = if i + 1 == refs.len() {
            client_right - word.width
        } else {
            x
        };
        x = word.right() + spacing;
    }
}

/// [CSS 2.1 § 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "The height of each inline-level box in the line box is calculated.
/// ... The inline-level boxes are aligned vertically according to their
/// 'vertical-align' property."
///
/// The line's baseline sits above its lowest word bottom by the block's
/// descent. Text of each box is set on the baseline; `sub` and `super`
/// drop and raise it by a fifth of the box's fragment height. Images keep
/// their position.
///
/// `top`, `bottom`, `middle`, `text-top` and `text-bottom` are valid values
/// but are not implemented: words of a box using one of them stay at the
/// top of the line, where the flow put them, instead of moving onto the
/// baseline.
fn apply_vertical_alignment(tree: &mut BoxTree, ctx: &LayoutContext<'_>, block: BoxId, line: LineId) {
    let refs = line_words(tree, line);
    let Some(lowest) = refs
        .iter()
        .map(|r| tree.words(r.owner)[r.index].bottom())
        .reduce(f32::max)
    else {
        return;
    };

    let baseline = lowest - ctx.metrics.descent(&tree.actual_font(block)) - 2.0;

    for (owner, rect) in tree.lines[line.0].rectangles().to_vec() {
        let shift = match tree.property(owner, Property::VerticalAlign) {
            "sub" => rect.height * 0.2,
            "super" => -rect.height * 0.2,
            // Not implemented; see above.
            "top" | "bottom" | "middle" | "text-top" | "text-bottom" => continue,
            _ => 0.0,
        };

        let descent = ctx.metrics.descent(&tree.actual_font(owner));
        let target_bottom = baseline + shift + descent + 2.0;
        for r in refs.iter().filter(|r| r.owner == owner) {
            let word = &mut tree.node_mut(owner).words[r.index];
            if !word.is_image() {
                word.top = target_bottom - word.height;
            }
        }
    }
}

/// [CSS 2.1 § 9.10 Text direction](https://www.w3.org/TR/CSS2/visuren.html#direction)
///
/// Mirror every word of the line about the block's content box.
fn apply_right_to_left(tree: &mut BoxTree, block: BoxId, line: LineId) {
    let client_left = tree.client_left(block);
    let client_right = tree.client_right(block);
    for r in line_words(tree, line) {
        let word = &mut tree.node_mut(r.owner).words[r.index];
        let offset = word.left - client_left;
        word.left = client_right - offset - word.width;
    }
}

/// Record on `line` the fragment of every box under `current` that has
/// words on it.
fn bubble_rectangles(tree: &mut BoxTree, current: BoxId, line: LineId) {
    let refs = line_words(tree, line);
    for child in tree.children(current).to_vec() {
        if tree.words(child).is_empty() {
            bubble_rectangles(tree, child, line);
            continue;
        }

        let envelope = refs
            .iter()
            .filter(|r| r.owner == child)
            .map(|r| tree.words(child)[r.index].bounds())
            .reduce(|a, b| a.union(&b));
        if let Some(rect) = envelope {
            update_rectangle(tree, line, child, rect);
        }
    }
}

/// Grow the fragment of `id` on `line` by `rect` plus the box's own insets,
/// and keep going up through inline parents.
///
/// The left inset only applies on the box's first line and the right inset
/// on its last; images take both on every line and no vertical inset.
fn update_rectangle(tree: &mut BoxTree, line: LineId, id: BoxId, rect: Rect) {
    let is_image = tree.is_image(id);
    let node = tree.node(id);
    let first = node.first_hosting_line == Some(line);
    let last = node.last_hosting_line == Some(line);

    let mut left = rect.left();
    let mut right = rect.right();
    let mut top = rect.top();
    let mut bottom = rect.bottom();

    if first || is_image {
        left -= tree.actual_border_width(id, Side::Left) + tree.actual_padding(id, Side::Left);
    }
    if last || is_image {
        right += tree.actual_border_width(id, Side::Right) + tree.actual_padding(id, Side::Right);
    }
    if !is_image {
        top -= tree.actual_border_width(id, Side::Top) + tree.actual_padding(id, Side::Top);
        bottom +=
            tree.actual_border_width(id, Side::Bottom) + tree.actual_padding(id, Side::Bottom);
    }

    let grown = Rect::from_edges(left, top, right, bottom);
    tree.lines[line.0].union_rectangle(id, grown);

    if let Some(parent) = tree.parent(id)
        && tree.display(parent) == "inline"
    {
        update_rectangle(tree, line, parent, grown);
    }
}

/// Copy the line's fragments onto their boxes.
fn assign_rectangles(tree: &mut BoxTree, line: LineId) {
    for (id, rect) in tree.lines[line.0].rectangles().to_vec() {
        let rectangles = &mut tree.node_mut(id).rectangles;
        match rectangles.iter_mut().find(|(l, _)| *l == line) {
            Some((_, existing)) => *existing = rect,
            None => rectangles.push((line, rect)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::box_model::Size;
    use crate::boxes::BoxKind;
    use crate::layout::{ApproximateFontMetrics, layout_tree};

    fn paragraph(tree: &mut BoxTree, text: &str) -> (BoxId, BoxId) {
        let block = tree.create_box(BoxKind::Normal, None);
        tree.append_child(tree.root(), block).unwrap();
        tree.set_property(block, Property::Display, "block");
        let text_box = tree.create_box(BoxKind::AnonymousInline, None);
        tree.append_child(block, text_box).unwrap();
        tree.set_text(text_box, text);
        (block, text_box)
    }

    fn run(tree: &mut BoxTree, width: f32) {
        let images = HashMap::new();
        let mut ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
        tree.set_size(tree.root(), Size::new(width, 0.0));
        layout_tree(tree, &mut ctx);
    }

    #[test]
    fn test_wide_word_does_not_leave_empty_line() {
        let mut tree = BoxTree::new();
        let (block, _) = paragraph(&mut tree, "abcdefghijklmnopqrstuvwxyz");
        run(&mut tree, 20.0);
        assert_eq!(tree.node(block).line_boxes.len(), 1);
    }

    #[test]
    fn test_fragment_spans_words_on_line() {
        let mut tree = BoxTree::new();
        let (_, text) = paragraph(&mut tree, "ab cd");
        run(&mut tree, 500.0);

        let words = tree.words(text);
        let rects = tree.node(text).rectangles();
        assert_eq!(rects.len(), 1);
        assert!((rects[0].1.left() - words[0].left).abs() < f32::EPSILON);
        assert!((rects[0].1.right() - words[2].right()).abs() < 1e-3);
    }
}
