//! The style cascade and block correction.
//!
//! [CSS 2.1 § 6 Assigning property values, Cascading, and Inheritance](https://www.w3.org/TR/CSS2/cascade.html)
//!
//! The cascade walks the tree depth-first. Each box first inherits from its
//! parent, then receives, in increasing precedence:
//!
//! 1. the rule for its tag name
//! 2. the rules for each of its classes
//! 3. its presentational attributes ([`attributes`])
//! 4. its `style` attribute
//!
//! Rules are looked up under `all` and then under every extra media type
//! the document is rendered for. `<style>` and `<link rel=stylesheet>` feed
//! their text into the sheet when they are reached, so they affect the
//! boxes after them in document order.

/// Presentational attribute translation.
pub mod attributes;
/// Style sheet ingestion.
pub mod stylesheet;

pub use stylesheet::{ALL_MEDIA, DeclarationBlock, StyleSheet};

use wren_common::resource::ResourceResolver;
use wren_common::warning::{Component, warn_once};

use crate::boxes::{BoxId, BoxKind, BoxTree};
use crate::style::Property;

/// Everything the cascade reads besides the tree.
pub struct Cascade<'a> {
    /// Rules fed so far. `<style>` and `<link>` add to it.
    pub style_sheet: &'a mut StyleSheet,
    /// Media types whose rules apply, besides `all`.
    pub media: &'a [String],
    /// Source of linked style sheets.
    pub resolver: &'a dyn ResourceResolver,
}

impl Cascade<'_> {
    /// [CSS 2.1 § 6.4 The cascade](https://www.w3.org/TR/CSS2/cascade.html#cascade)
    ///
    /// Cascade styles onto every descendant of `start`.
    pub fn apply(&mut self, tree: &mut BoxTree, start: BoxId) {
        for id in tree.children(start).to_vec() {
            tree.inherit_style(id, start, false);

            if tree.tag(id).is_some() {
                self.apply_rules(tree, id);
                self.ingest_style_elements(tree, id);
            }

            self.apply(tree, id);
        }
    }

    fn apply_rules(&self, tree: &mut BoxTree, id: BoxId) {
        let name = tree.tag_name(id).to_string();
        self.assign_selector(tree, id, &name);

        let classes: Vec<String> = tree
            .tag(id)
            .and_then(|t| t.attribute("class"))
            .map(|c| c.split_whitespace().map(|c| format!(".{}", c.to_lowercase())).collect())
            .unwrap_or_default();
        for class in classes {
            self.assign_selector(tree, id, &class);
        }

        attributes::translate_attributes(tree, id);

        let inline_style = tree
            .tag(id)
            .and_then(|t| t.attribute("style"))
            .map(DeclarationBlock::parse);
        if let Some(block) = inline_style {
            block.assign_to(tree, id);
        }
    }

    fn assign_selector(&self, tree: &mut BoxTree, id: BoxId, selector: &str) {
        let media = std::iter::once(ALL_MEDIA)
            .chain(self.media.iter().map(String::as_str).filter(|m| *m != ALL_MEDIA));
        for medium in media {
            if let Some(block) = self.style_sheet.block(medium, selector) {
                block.assign_to(tree, id);
            }
        }
    }

    /// [CSS 2.1 § 6.1 Specified values](https://www.w3.org/TR/CSS2/cascade.html#specified-value)
    ///
    /// A `<style>` element holding exactly one text box feeds that text. A
    /// `<link rel=stylesheet>` feeds what the resolver returns for its
    /// `href`; a failed load is reported and feeds nothing.
    fn ingest_style_elements(&mut self, tree: &BoxTree, id: BoxId) {
        match tree.tag_name(id) {
            "style" => {
                if let [only] = tree.children(id) {
                    self.style_sheet.feed(&tree.node(*only).text);
                }
            }
            "link" => {
                let Some(tag) = tree.tag(id) else {
                    return;
                };
                if !tag.attribute("rel").is_some_and(|r| r.eq_ignore_ascii_case("stylesheet")) {
                    return;
                }
                let href = tag.attribute("href").unwrap_or_default();
                match self.resolver.stylesheet(href) {
                    Ok(text) => self.style_sheet.feed(&text),
                    Err(e) => warn_once(Component::Resource, &format!("style sheet '{href}': {e}")),
                }
            }
            _ => {}
        }
    }
}

/// [CSS 2.1 § 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
///
/// "if a block container box has a block-level box inside it, then we
/// force it to have only block-level boxes inside it."
///
/// In every box whose children are not all inline, each maximal run of
/// inline children is moved into a new anonymous block. A run made of one
/// white-space box gets an undisplayed white-space block instead.
pub fn correct_blocks(tree: &mut BoxTree, start: BoxId) {
    if !tree.contains_inlines_only(start) {
        for group in inline_groups(tree, start) {
            let Some(&first) = group.first() else {
                continue;
            };

            let wrapper = if let [only] = group.as_slice()
                && tree.kind(*only) == BoxKind::AnonymousSpaceInline
            {
                let wrapper = tree.create_box(BoxKind::AnonymousSpaceBlock, None);
                tree.set_property(wrapper, Property::Display, "none");
                wrapper
            } else {
                let wrapper = tree.create_box(BoxKind::AnonymousBlock, None);
                tree.set_property(wrapper, Property::Display, "block");
                wrapper
            };
            tree.inherit_style(wrapper, start, false);

            let Some(index) = tree.children(start).iter().position(|&c| c == first) else {
                panic!("correct_blocks: {first:?} is missing from {start:?}");
            };
            tree.insert_child_at(start, index, wrapper);
            for inline in group {
                if let Err(e) = tree.reparent(inline, wrapper) {
                    panic!("correct_blocks: {e}");
                }
            }
        }
    }

    for child in tree.children(start).to_vec() {
        correct_blocks(tree, child);
    }
}

/// Maximal runs of consecutive `inline` children.
fn inline_groups(tree: &BoxTree, id: BoxId) -> Vec<Vec<BoxId>> {
    let mut groups: Vec<Vec<BoxId>> = Vec::new();
    let mut in_group = false;

    for &child in tree.children(id) {
        if tree.display(child) == "inline" {
            if in_group {
                if let Some(group) = groups.last_mut() {
                    group.push(child);
                }
            } else {
                groups.push(vec![child]);
                in_group = true;
            }
        } else {
            in_group = false;
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use wren_common::resource::NullResolver;
    use wren_html::Tag;

    use super::*;

    fn tagged(tree: &mut BoxTree, parent: BoxId, raw: &str) -> BoxId {
        let id = tree.create_box(BoxKind::Normal, Some(Tag::parse(raw)));
        tree.append_child(parent, id).unwrap();
        id
    }

    fn text(tree: &mut BoxTree, parent: BoxId, content: &str) -> BoxId {
        let kind = if content.trim().is_empty() {
            BoxKind::AnonymousSpaceInline
        } else {
            BoxKind::AnonymousInline
        };
        let id = tree.create_box(kind, None);
        tree.append_child(parent, id).unwrap();
        tree.set_text(id, content);
        id
    }

    #[test]
    fn test_inline_runs_are_wrapped() {
        let mut tree = BoxTree::new();
        let div = tagged(&mut tree, BoxId::ROOT, "<div>");
        tree.set_property(div, Property::Display, "block");
        let a = text(&mut tree, div, "hello");
        let p = tagged(&mut tree, div, "<p>");
        tree.set_property(p, Property::Display, "block");
        let space = text(&mut tree, div, " ");

        correct_blocks(&mut tree, BoxId::ROOT);

        let children = tree.children(div).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(tree.kind(children[0]), BoxKind::AnonymousBlock);
        assert_eq!(tree.children(children[0]), &[a]);
        assert_eq!(children[1], p);
        assert_eq!(tree.kind(children[2]), BoxKind::AnonymousSpaceBlock);
        assert_eq!(tree.parent(space), Some(children[2]));
    }

    #[test]
    fn test_later_rules_merge_into_earlier() {
        let mut tree = BoxTree::new();
        let style = tagged(&mut tree, BoxId::ROOT, "<style>");
        let _ = text(&mut tree, style, "p { color: red; margin: 1px }");
        let p = tagged(&mut tree, BoxId::ROOT, "<p class=lead>");

        let mut sheet = StyleSheet::new();
        sheet.feed("p { color: blue } .lead { margin-left: 5px }");
        let media = Vec::new();
        Cascade {
            style_sheet: &mut sheet,
            media: &media,
            resolver: &NullResolver,
        }
        .apply(&mut tree, BoxId::ROOT);

        assert_eq!(tree.property(p, Property::Color), "red");
        assert_eq!(tree.property(p, Property::MarginTop), "1px");
        assert_eq!(tree.property(p, Property::MarginLeft), "5px");
    }
}
