//! Word measurement.
//!
//! Words are measured once, the first time their box is laid out, and keep
//! their size across later passes.

use wren_common::image::{LoadedImage, PLACEHOLDER_SIZE};

use super::LayoutContext;
use crate::box_model::Side;
use crate::boxes::{BoxId, BoxTree};
use crate::style::Property;
use crate::text::{BoxWord, collapses_white_space, eliminates_line_breaks};
use crate::values::{Length, LengthUnit, parse_length};

/// Give every word of `id` its width and height.
pub(crate) fn measure_words(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    if tree.node(id).words_measured {
        return;
    }

    if tree.tag_name(id) == "img" {
        measure_image(tree, ctx, id);
    } else {
        measure_text(tree, ctx, id);
    }

    tree.node_mut(id).words_measured = true;
}

/// [CSS 2.1 § 16.4 Spacing](https://www.w3.org/TR/CSS2/text.html#spacing-props)
///
/// "Word spacing algorithms are user agent-dependent." Here the width of a
/// space in the box's font, plus any declared `word-spacing`.
pub(crate) fn word_spacing(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) -> f32 {
    if let Some(spacing) = tree.node(id).word_spacing {
        return spacing;
    }

    let font = tree.actual_font(id);
    let mut spacing = ctx.metrics.text_width(" ", &font);
    let declared = tree.property(id, Property::WordSpacing);
    if !matches!(declared, "" | "normal") {
        spacing += parse_length(declared, 0.0, tree.em_height(id));
    }

    tree.node_mut(id).word_spacing = Some(spacing);
    spacing
}

/// [CSS 2.1 § 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
fn measure_text(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let white_space = tree.property(id, Property::WhiteSpace);
    let collapse = collapses_white_space(white_space);
    let eliminate = eliminates_line_breaks(white_space);

    let font = tree.actual_font(id);
    let spacing = word_spacing(tree, ctx, id);
    let line_spacing = ctx.metrics.line_height(&font);

    let mut last_was_space = false;
    for word in &mut tree.node_mut(id).words {
        if eliminate {
            word.replace_line_breaks_and_tabs();
        }

        word.height = line_spacing;
        if word.is_spaces() {
            word.width = if word.is_tab() {
                spacing * 4.0
            } else if word.is_line_break() || (collapse && last_was_space) {
                0.0
            } else if collapse {
                spacing
            } else {
                spacing * word.text().chars().count() as f32
            };
            last_was_space = true;
        } else {
            word.width = ctx.metrics.text_width(word.text(), &font);
            last_was_space = false;
        }
    }
}

/// [CSS 2.1 § 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// "If 'height' and 'width' both have computed values of 'auto' and the
/// element also has an intrinsic width, then that intrinsic width is the
/// used value of 'width'."
///
/// An `<img>` is a single image word. A positive pixel `width`/`height`
/// overrides the intrinsic size; an image that never loaded is a 50×50
/// placeholder. The word's height includes the box's vertical border and
/// padding.
fn measure_image(tree: &mut BoxTree, ctx: &LayoutContext<'_>, id: BoxId) {
    let src = tree
        .tag(id)
        .and_then(|t| t.attribute("src"))
        .unwrap_or_default()
        .to_string();

    let placeholder = PLACEHOLDER_SIZE as f32;
    let (intrinsic_width, intrinsic_height) = ctx
        .images
        .get(&src)
        .map_or((placeholder, placeholder), LoadedImage::dimensions_f32);

    let width = declared_pixels(tree.property(id, Property::Width)).unwrap_or(intrinsic_width);
    let height = declared_pixels(tree.property(id, Property::Height)).unwrap_or(intrinsic_height)
        + tree.actual_border_width(id, Side::Top)
        + tree.actual_padding(id, Side::Top)
        + tree.actual_border_width(id, Side::Bottom)
        + tree.actual_padding(id, Side::Bottom);

    tree.node_mut(id).words = vec![BoxWord::image(id, &src, width, height)];
}

/// A positive length in pixels.
fn declared_pixels(value: &str) -> Option<f32> {
    let length = Length::parse(value);
    (!length.has_error() && length.unit() == LengthUnit::Px && length.number() > 0.0)
        .then(|| length.number())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::boxes::BoxKind;
    use crate::layout::{ApproximateFontMetrics, FontMetrics};

    fn text_box(tree: &mut BoxTree, text: &str, white_space: &str) -> BoxId {
        let id = tree.create_box(BoxKind::AnonymousInline, None);
        tree.append_child(tree.root(), id).unwrap();
        tree.set_property(id, Property::WhiteSpace, white_space);
        tree.set_text(id, text);
        id
    }

    #[test]
    fn test_collapsed_space_after_space_is_zero_width() {
        let mut tree = BoxTree::new();
        let images = HashMap::new();
        let ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
        let id = text_box(&mut tree, "a \n b", "normal");
        measure_words(&mut tree, &ctx, id);

        let widths: Vec<f32> = tree.words(id).iter().map(|w| w.width).collect();
        let space = ApproximateFontMetrics.text_width(" ", &tree.actual_font(id));
        assert_eq!(widths.len(), 5);
        assert!((widths[1] - space).abs() < f32::EPSILON);
        assert!(widths[2].abs() < f32::EPSILON);
        assert!(widths[3].abs() < f32::EPSILON);
    }

    #[test]
    fn test_pre_keeps_line_breaks_and_space_runs() {
        let mut tree = BoxTree::new();
        let images = HashMap::new();
        let ctx = LayoutContext::new(&ApproximateFontMetrics, &images);
        let id = text_box(&mut tree, "a   b\n", "pre");
        measure_words(&mut tree, &ctx, id);

        let space = ApproximateFontMetrics.text_width(" ", &tree.actual_font(id));
        let words = tree.words(id);
        assert!((words[1].width - 3.0 * space).abs() < 1e-4);
        assert!(words[3].is_line_break());
    }
}
