//! The initial container: one document's box tree and everything shared
//! across it.
//!
//! [CSS 2.1 § 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
//!
//! "The containing block in which the root element lives is a rectangle
//! called the initial containing block."
//!
//! Loading a document runs, in order:
//!
//! 1. tree construction from the tokenizer's tag and text stream
//! 2. the cascade ([`Cascade::apply`])
//! 3. block correction ([`correct_blocks`])
//! 4. image loading through the resource resolver
//!
//! [`InitialContainer::measure`] then lays the tree out for a given size,
//! and [`InitialContainer::paint`] draws it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wren_common::image::LoadedImage;
use wren_common::resource::{ResourceError, ResourceResolver};
use wren_common::warning::{Component, clear_warnings, warn_once};
use wren_html::{DocumentTokenizer, MarkupScanner, MarkupToken};

use crate::box_model::{Point, Rect, Size};
use crate::boxes::{BoxId, BoxKind, BoxTree};
use crate::cascade::{ALL_MEDIA, Cascade, StyleSheet, correct_blocks};
use crate::layout::{FontMetrics, LayoutContext, layout_tree};
use crate::paint::{Canvas, Painter};
use crate::snapshot::BoxSnapshot;
use crate::style::{DEFAULT_FONT_SIZE_PT, GenericFamilies};
use crate::ua_stylesheet::default_style_sheet;

/// Document-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOptions {
    /// Media types whose rules apply. Rules outside any `@media` block
    /// always apply.
    pub media: Vec<String>,
    /// Size of `font-size: medium`, in points.
    pub base_font_size: f32,
    /// Concrete families used for the generic `font-family` keywords.
    pub generic_families: GenericFamilies,
    /// Ask the canvas to draw shapes without anti-aliasing.
    pub avoid_geometry_antialias: bool,
    /// Ask the canvas to draw text without anti-aliasing.
    pub avoid_text_antialias: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            media: vec![ALL_MEDIA.to_string()],
            base_font_size: DEFAULT_FONT_SIZE_PT,
            generic_families: GenericFamilies::default(),
            avoid_geometry_antialias: false,
            avoid_text_antialias: false,
        }
    }
}

/// A document's box tree together with its style sheet, loaded images,
/// link regions and layout extent.
pub struct InitialContainer {
    tree: BoxTree,
    /// Rules every load starts from: the default sheet plus whatever was
    /// added with [`InitialContainer::add_style_sheet`].
    base_style_sheet: StyleSheet,
    style_sheet: StyleSheet,
    images: HashMap<String, LoadedImage>,
    link_regions: Vec<(BoxId, Rect)>,
    maximum_size: Size,
    scroll_offset: Point,
    options: ContainerOptions,
    resolver: Box<dyn ResourceResolver>,
}

impl InitialContainer {
    /// An empty container.
    #[must_use]
    pub fn new(options: ContainerOptions, resolver: Box<dyn ResourceResolver>) -> Self {
        let base_style_sheet = default_style_sheet().clone();
        Self {
            tree: BoxTree::with_fonts(options.base_font_size, options.generic_families.clone()),
            style_sheet: base_style_sheet.clone(),
            base_style_sheet,
            images: HashMap::new(),
            link_regions: Vec::new(),
            maximum_size: Size::default(),
            scroll_offset: Point::default(),
            options,
            resolver,
        }
    }

    /// A container holding `document`, tokenized by [`MarkupScanner`].
    #[must_use]
    pub fn from_document(
        document: &str,
        options: ContainerOptions,
        resolver: Box<dyn ResourceResolver>,
    ) -> Self {
        let mut container = Self::new(options, resolver);
        container.load(document);
        container
    }

    /// Add rules that apply to every document loaded after this call, below
    /// the document's own `<style>` and `<link>` rules.
    pub fn add_style_sheet(&mut self, source: &str) {
        self.base_style_sheet.feed(source);
    }

    /// Replace the tree with `document`, tokenized by [`MarkupScanner`].
    pub fn load(&mut self, document: &str) {
        self.load_with(document, &MarkupScanner::new());
    }

    /// Replace the tree with `document`.
    ///
    /// Warnings from any earlier document are forgotten first.
    pub fn load_with(&mut self, document: &str, tokenizer: &dyn DocumentTokenizer) {
        clear_warnings();

        self.tree = BoxTree::with_fonts(
            self.options.base_font_size,
            self.options.generic_families.clone(),
        );
        self.style_sheet = self.base_style_sheet.clone();
        self.images.clear();
        self.link_regions.clear();
        self.maximum_size = Size::default();

        self.build(tokenizer.tokenize(document));

        let root = self.tree.root();
        Cascade {
            style_sheet: &mut self.style_sheet,
            media: &self.options.media,
            resolver: self.resolver.as_ref(),
        }
        .apply(&mut self.tree, root);
        correct_blocks(&mut self.tree, root);

        self.load_images();
    }

    /// [WHATWG HTML § 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    ///
    /// A much smaller set of rules than the standard's insertion modes:
    ///
    /// - an opening tag attaches a box to the current box and becomes the
    ///   current box, unless it is void
    /// - a closing tag makes the parent of the nearest open box with the
    ///   same name current
    /// - text attaches an anonymous inline box, or a white-space box if it
    ///   is only white space
    fn build(&mut self, tokens: Vec<MarkupToken>) {
        let mut current = self.tree.root();

        for token in tokens {
            match token {
                MarkupToken::Text(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    let kind = if text.trim().is_empty() {
                        BoxKind::AnonymousSpaceInline
                    } else {
                        BoxKind::AnonymousInline
                    };
                    let id = self.tree.create_box(kind, None);
                    self.attach(current, id);
                    self.tree.set_text(id, &text);
                }
                MarkupToken::Tag(tag) if tag.is_closing() => {
                    current = self.close(current, tag.name());
                }
                MarkupToken::Tag(tag) => {
                    // Doctype and other markup declarations generate no box.
                    if tag.name().starts_with('!') {
                        continue;
                    }
                    let void = tag.is_void();
                    let id = self.tree.create_box(BoxKind::Normal, Some(tag));
                    self.attach(current, id);
                    if !void {
                        current = id;
                    }
                }
            }
        }
    }

    fn attach(&mut self, parent: BoxId, child: BoxId) {
        if let Err(e) = self.tree.append_child(parent, child) {
            panic!("tree construction: {e}");
        }
    }

    /// The box that becomes current after `</name>`. A closing tag with no
    /// open match falls back to the root.
    fn close(&self, current: BoxId, name: &str) -> BoxId {
        let root = self.tree.root();
        let matching = std::iter::once(current)
            .chain(self.tree.ancestors(current))
            .take_while(|&id| id != root)
            .find(|&id| self.tree.tag_name(id) == name);

        match matching {
            Some(open) => self.tree.parent(open).unwrap_or(root),
            None => {
                warn_once(Component::Html, &format!("unmatched closing tag </{name}>"));
                root
            }
        }
    }

    /// Load every `<img src>` once. A failed image is replaced by a
    /// placeholder so layout still reserves room for it.
    fn load_images(&mut self) {
        let sources: Vec<String> = (0..self.tree.len())
            .map(BoxId)
            .filter(|&id| self.tree.tag_name(id) == "img")
            .filter_map(|id| self.tree.tag(id)?.attribute("src").map(str::to_string))
            .collect();

        for src in sources {
            if self.images.contains_key(&src) {
                continue;
            }
            let image = self.resolver.image(&src).unwrap_or_else(|e| {
                warn_once(Component::Resource, &format!("image '{src}': {e}"));
                LoadedImage::placeholder()
            });
            let _ = self.images.insert(src, image);
        }
    }

    /// [CSS 2.1 § 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
    ///
    /// Lay the whole tree out inside `size`. Link regions are cleared; the
    /// next [`InitialContainer::paint`] records them again.
    pub fn measure(&mut self, metrics: &dyn FontMetrics, size: Size) {
        let root = self.tree.root();
        self.tree.set_location(root, Point::default());
        self.tree.set_size(root, size);
        self.link_regions.clear();

        let mut ctx = LayoutContext::new(metrics, &self.images);
        layout_tree(&mut self.tree, &mut ctx);
        self.maximum_size = ctx.maximum_size;
    }

    /// Paint the tree onto `canvas`, shifted by the scroll offset, and
    /// record the link regions.
    pub fn paint(&mut self, canvas: &mut dyn Canvas, metrics: &dyn FontMetrics) {
        self.link_regions = Painter::new(&self.tree, metrics, self.scroll_offset).paint(canvas);
    }

    /// The `<a>` box painted at `point`, if any.
    #[must_use]
    pub fn link_at(&self, point: Point) -> Option<BoxId> {
        self.link_regions
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|&(id, _)| id)
    }

    /// Activate the link painted at `point` through the resource resolver.
    ///
    /// Returns the `href` that was activated, or `None` if there is no link
    /// at `point`.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error if it could not activate the target.
    pub fn activate_link(&self, point: Point) -> Result<Option<String>, ResourceError> {
        let Some(link) = self.link_at(point) else {
            return Ok(None);
        };
        let href = self
            .tree
            .tag(link)
            .and_then(|t| t.attribute("href"))
            .unwrap_or_default()
            .to_string();
        self.resolver.activate_link(&href)?;
        Ok(Some(href))
    }

    /// A serializable copy of the measured tree.
    #[must_use]
    pub fn snapshot(&self) -> BoxSnapshot {
        BoxSnapshot::capture(&self.tree, self.tree.root())
    }

    /// The box tree.
    #[must_use]
    pub const fn tree(&self) -> &BoxTree {
        &self.tree
    }

    /// The box tree, for edits before the next [`InitialContainer::measure`].
    pub fn tree_mut(&mut self) -> &mut BoxTree {
        &mut self.tree
    }

    /// Rules in effect for the current document.
    #[must_use]
    pub const fn style_sheet(&self) -> &StyleSheet {
        &self.style_sheet
    }

    /// Images loaded for the current document, keyed by `src`.
    #[must_use]
    pub const fn images(&self) -> &HashMap<String, LoadedImage> {
        &self.images
    }

    /// Screen rectangles of the `<a>` boxes, from the last paint.
    #[must_use]
    pub fn link_regions(&self) -> &[(BoxId, Rect)] {
        &self.link_regions
    }

    /// The furthest right and bottom edges reached by the last measurement.
    #[must_use]
    pub const fn maximum_size(&self) -> Size {
        self.maximum_size
    }

    /// Offset added to every painted coordinate.
    #[must_use]
    pub const fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    /// Set the offset added to every painted coordinate.
    pub fn set_scroll_offset(&mut self, offset: Point) {
        self.scroll_offset = offset;
    }

    /// The options the container was created with.
    #[must_use]
    pub const fn options(&self) -> &ContainerOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use wren_common::resource::NullResolver;

    use super::*;

    fn container(document: &str) -> InitialContainer {
        InitialContainer::from_document(document, ContainerOptions::default(), Box::new(NullResolver))
    }

    #[test]
    fn test_unmatched_closing_tag_falls_back_to_root() {
        let c = container("<div><b>x</i>y</div>");
        let tree = c.tree();
        let root = tree.root();
        // `</i>` closes everything: "y" lands under the root, next to the
        // div, and is then wrapped in an anonymous block.
        let last = *tree.children(root).last().unwrap();
        assert_eq!(tree.kind(last), BoxKind::AnonymousBlock);
        let text = tree.children(last)[0];
        assert_eq!(tree.words(text)[0].text(), "y");
    }

    #[test]
    fn test_void_tag_does_not_take_children() {
        let c = container("<p>a<br>b</p>");
        let tree = c.tree();
        let p = tree.children(tree.root())[0];
        let br = tree.children(p)[1];
        assert_eq!(tree.tag_name(br), "br");
        assert!(tree.children(br).is_empty());
        assert_eq!(tree.children(p).len(), 3);
    }

    #[test]
    fn test_failed_image_gets_placeholder() {
        let c = container("<img src=missing.png>");
        let image = &c.images()["missing.png"];
        assert_eq!(image.width(), 50);
    }
}
