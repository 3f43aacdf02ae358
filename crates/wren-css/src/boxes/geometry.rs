//! Edge arithmetic and subtree queries used by layout and paint.

use super::{BoxId, BoxKind, BoxTree};
use crate::box_model::{Rect, Side};
use crate::layout::{LineId, WordRef};
use crate::style::{Property, establishes_containing_block};

impl BoxTree {
    /// Left content edge: border-box left plus left border and padding.
    #[must_use]
    pub fn client_left(&self, id: BoxId) -> f32 {
        self.location(id).x
            + self.actual_border_width(id, Side::Left)
            + self.actual_padding(id, Side::Left)
    }

    /// Top content edge.
    #[must_use]
    pub fn client_top(&self, id: BoxId) -> f32 {
        self.location(id).y
            + self.actual_border_width(id, Side::Top)
            + self.actual_padding(id, Side::Top)
    }

    /// Right content edge.
    #[must_use]
    pub fn client_right(&self, id: BoxId) -> f32 {
        self.actual_right(id)
            - self.actual_padding(id, Side::Right)
            - self.actual_border_width(id, Side::Right)
    }

    /// Bottom content edge.
    #[must_use]
    pub fn client_bottom(&self, id: BoxId) -> f32 {
        self.actual_bottom(id)
            - self.actual_padding(id, Side::Bottom)
            - self.actual_border_width(id, Side::Bottom)
    }

    /// The content box.
    #[must_use]
    pub fn client_rectangle(&self, id: BoxId) -> Rect {
        Rect::from_edges(
            self.client_left(id),
            self.client_top(id),
            self.client_right(id),
            self.client_bottom(id),
        )
    }

    /// Width of the content box.
    #[must_use]
    pub fn available_width(&self, id: BoxId) -> f32 {
        self.size(id).width - self.border(id).horizontal() - self.padding(id).horizontal()
    }

    /// [CSS 2.1 § 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "For other elements, if the element's position is 'relative' or
    /// 'static', the containing block is formed by the content edge of the
    /// nearest block container ancestor box."
    ///
    /// The nearest ancestor displayed as `block`, `table` or `table-cell`,
    /// or the topmost ancestor if there is none. The root is its own
    /// containing block.
    #[must_use]
    pub fn containing_block(&self, id: BoxId) -> BoxId {
        let Some(mut current) = self.parent(id) else {
            return id;
        };
        while !establishes_containing_block(self.display(current)) {
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// The previous sibling that takes part in block flow: siblings with
    /// `display: none` or `position: absolute` are skipped.
    ///
    /// # Panics
    ///
    /// Panics if `id` has a parent that does not list it as a child.
    #[must_use]
    pub fn previous_in_flow_sibling(&self, id: BoxId) -> Option<BoxId> {
        let siblings = self.children(self.parent(id)?);
        let Some(index) = siblings.iter().position(|&s| s == id) else {
            panic!("{id:?} is missing from its parent's children");
        };

        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|&s| self.display(s) != "none" && self.property(s, Property::Position) != "absolute")
    }

    /// 1-based position of a `list-item` among its `list-item` siblings.
    #[must_use]
    pub fn list_index(&self, id: BoxId) -> usize {
        let Some(parent) = self.parent(id) else {
            return 1;
        };
        let mut index = 0;
        for &sibling in self.children(parent) {
            if self.display(sibling) == "list-item" {
                index += 1;
            }
            if sibling == id {
                break;
            }
        }
        index
    }

    /// Whether every child is displayed `inline`. True for a box without
    /// children.
    #[must_use]
    pub fn contains_inlines_only(&self, id: BoxId) -> bool {
        self.children(id)
            .iter()
            .all(|&c| self.display(c) == "inline")
    }

    /// A box whose only word is an image.
    #[must_use]
    pub fn is_image(&self, id: BoxId) -> bool {
        matches!(self.words(id), [word] if word.is_image())
    }

    /// Whether any corner has a positive radius.
    #[must_use]
    pub fn is_rounded(&self, id: BoxId) -> bool {
        self.corner_radii(id).iter().any(|&r| r > 0.0)
    }

    /// Whether the box shows nothing but white space.
    ///
    /// True when it has neither words nor children, when all of its words
    /// are spaces, when its only child is a white-space block, or when it has
    /// no words and every child is itself space or empty.
    #[must_use]
    pub fn is_space_or_empty(&self, id: BoxId) -> bool {
        let words = self.words(id);
        let children = self.children(id);

        if !words.is_empty() {
            return words.iter().all(|w| w.is_spaces());
        }
        if let [only] = children
            && self.kind(*only) == BoxKind::AnonymousSpaceBlock
        {
            return true;
        }
        children.iter().all(|&c| self.is_space_or_empty(c))
    }

    /// [CSS 2.1 § 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
    ///
    /// The narrowest the box can get: the widest unbreakable word in the
    /// subtree, plus the horizontal borders and paddings of every box from
    /// the word's owner up to `id`.
    #[must_use]
    pub fn minimum_width(&self, id: BoxId) -> f32 {
        let Some((owner, width)) = self.widest_word(id) else {
            return 0.0;
        };

        let mut total = width;
        let mut current = Some(owner);
        while let Some(b) = current {
            total += self.border(b).horizontal() + self.padding(b).horizontal();
            if b == id {
                break;
            }
            current = self.parent(b);
        }
        total
    }

    fn widest_word(&self, id: BoxId) -> Option<(BoxId, f32)> {
        let words = self.words(id);
        if words.is_empty() {
            self.children(id)
                .iter()
                .filter_map(|&c| self.widest_word(c))
                .fold(None, |best, (b, w)| match best {
                    Some((_, bw)) if bw >= w => best,
                    _ => Some((b, w)),
                })
        } else {
            words
                .iter()
                .map(|w| w.width)
                .fold(None, |best: Option<f32>, w| Some(best.map_or(w, |b| b.max(w))))
                .map(|w| (id, w))
        }
    }

    /// The width the subtree would take if nothing wrapped: the widest run
    /// of inline content plus every border and padding met on the way down.
    #[must_use]
    pub fn full_width(&self, id: BoxId) -> f32 {
        let mut sum = 0.0;
        let mut padding_sum = 0.0;
        self.full_width_into(id, &mut sum, &mut padding_sum);
        padding_sum + sum
    }

    fn full_width_into(&self, id: BoxId, sum: &mut f32, padding_sum: &mut f32) {
        if self.display(id) != "inline" {
            *sum = 0.0;
        }
        *padding_sum += self.border(id).horizontal() + self.padding(id).horizontal();

        let words = self.words(id);
        if words.is_empty() {
            for &child in self.children(id) {
                self.full_width_into(child, sum, padding_sum);
            }
        } else {
            *sum += words.iter().map(|w| w.width).sum::<f32>();
        }
    }

    /// The lowest bottom edge reached by the subtree's line fragments and
    /// border boxes, starting from `current`.
    #[must_use]
    pub fn maximum_bottom(&self, id: BoxId, current: f32) -> f32 {
        let own = self
            .node(id)
            .rectangles
            .iter()
            .fold(current, |acc, (_, r)| acc.max(r.bottom()));

        self.children(id).iter().fold(own, |acc, &child| {
            acc.max(self.actual_bottom(child))
                .max(self.maximum_bottom(child, acc))
        })
    }

    /// Move the subtree down by `amount`: line fragments, words and border
    /// boxes.
    pub fn offset_top(&mut self, id: BoxId, amount: f32) {
        let node = self.node_mut(id);
        for (_, r) in &mut node.rectangles {
            r.y += amount;
        }
        for word in &mut node.words {
            word.top += amount;
        }
        node.location.y += amount;

        for child in self.children(id).to_vec() {
            self.offset_top(child, amount);
        }
    }

    /// The first word of the subtree that was placed on `line`.
    #[must_use]
    pub fn first_word_occurrence(&self, id: BoxId, line: LineId) -> Option<WordRef> {
        if self.words(id).is_empty() {
            self.children(id)
                .iter()
                .find_map(|&c| self.first_word_occurrence(c, line))
        } else {
            self.lines
                .get(line.0)?
                .words()
                .iter()
                .find(|w| w.owner == id)
                .copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BoxWord;

    fn attach(tree: &mut BoxTree, parent: BoxId, display: &str) -> BoxId {
        let id = tree.create_box(BoxKind::Normal, None);
        tree.append_child(parent, id).unwrap();
        tree.set_property(id, Property::Display, display);
        id
    }

    #[test]
    fn test_containing_block_skips_inlines() {
        let mut tree = BoxTree::new();
        let block = attach(&mut tree, BoxId::ROOT, "block");
        let span = attach(&mut tree, block, "inline");
        let inner = attach(&mut tree, span, "inline");
        assert_eq!(tree.containing_block(inner), block);
        assert_eq!(tree.containing_block(BoxId::ROOT), BoxId::ROOT);
    }

    #[test]
    fn test_previous_in_flow_sibling_skips_hidden() {
        let mut tree = BoxTree::new();
        let a = attach(&mut tree, BoxId::ROOT, "block");
        let _hidden = attach(&mut tree, BoxId::ROOT, "none");
        let c = attach(&mut tree, BoxId::ROOT, "block");
        assert_eq!(tree.previous_in_flow_sibling(c), Some(a));
        assert_eq!(tree.previous_in_flow_sibling(a), None);
    }

    #[test]
    fn test_minimum_width_adds_owner_chain_insets() {
        let mut tree = BoxTree::new();
        let block = attach(&mut tree, BoxId::ROOT, "block");
        let span = attach(&mut tree, block, "inline");
        tree.set_property(span, Property::PaddingLeft, "3px");
        tree.set_property(block, Property::PaddingRight, "4px");
        let word = |text: &str, width: f32| {
            let mut w = BoxWord::new(span, text);
            w.width = width;
            w
        };
        tree.node_mut(span).words = vec![word("ab", 10.0), word("abcd", 30.0)];
        assert!((tree.minimum_width(block) - 37.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_space_only_cell_is_empty() {
        let mut tree = BoxTree::new();
        let cell = attach(&mut tree, BoxId::ROOT, "table-cell");
        let text = tree.create_box(BoxKind::AnonymousSpaceInline, None);
        tree.append_child(cell, text).unwrap();
        tree.set_text(text, "  ");
        assert!(tree.is_space_or_empty(cell));

        tree.set_text(text, " x ");
        assert!(!tree.is_space_or_empty(cell));
    }
}
