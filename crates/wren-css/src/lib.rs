//! Box tree, cascade, layout and paint for the Wren layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Values** ([CSS 2.1 § 4.3 Values](https://www.w3.org/TR/CSS2/syndata.html#values))
//!   - Lengths in `px`, `em`, `ex`, `in`, `cm`, `mm`, `pt`, `pc` and percentages
//!   - Named, `#rgb`, `#rrggbb` and `rgb()` colors
//!   - Border width keywords
//!
//! - **Declared style** ([CSS 2.1 § 6 Assigning property values](https://www.w3.org/TR/CSS2/cascade.html))
//!   - A static property table with defaults and the inherited subset
//!   - Shorthand expansion for `margin`, `padding`, `border*`, `corner-radius` and `font`
//!
//! - **Box tree** ([CSS 2.1 § 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen))
//!   - Arena storage with anonymous and table-spacer box kinds
//!   - Memoized actual values, dropped on every property write
//!
//! - **Cascade** ([CSS 2.1 § 6.4 The cascade](https://www.w3.org/TR/CSS2/cascade.html#cascade))
//!   - Tag, class and `style` attribute rules, per media type
//!   - Presentational HTML attributes
//!   - Block correction with anonymous block boxes
//!
//! - **Layout** ([CSS 2.1 § 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html))
//!   - Block stacking with collapsed adjoining margins
//!   - Line boxes with wrapping, `text-align`, `vertical-align: sub|super`,
//!     `direction: rtl` and `text-indent`
//!   - Tables with `colspan`, `rowspan`, `border-spacing` and minimum widths
//!   - List markers
//!
//! - **Paint** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Backgrounds, gradients, rounded corners, 3D border styles, text,
//!     images and text decoration onto an abstract canvas
//!
//! # Not Implemented
//!
//! - Selectors other than tag names and classes
//! - Floats and positioning
//! - `vertical-align` values other than `baseline`, `sub` and `super`
//! - Collapsing table borders
//! - Flexbox and grid

/// Geometry primitives.
pub mod box_model;
/// The box tree per [CSS 2.1 § 9.2](https://www.w3.org/TR/CSS2/visuren.html#box-gen).
pub mod boxes;
/// Style sheets, the cascade and block correction per [CSS 2.1 § 6](https://www.w3.org/TR/CSS2/cascade.html).
pub mod cascade;
/// The initial container.
pub mod container;
/// Layout per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html) and [§ 17](https://www.w3.org/TR/CSS2/tables.html).
pub mod layout;
/// Painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Serializable copies of a measured tree.
pub mod snapshot;
/// Declared style per [CSS 2.1 § 6](https://www.w3.org/TR/CSS2/cascade.html).
pub mod style;
/// Words per [CSS 2.1 § 16.6](https://www.w3.org/TR/CSS2/text.html#white-space-model).
pub mod text;
/// User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod ua_stylesheet;
/// Value parsing per [CSS 2.1 § 4.3](https://www.w3.org/TR/CSS2/syndata.html#values).
pub mod values;

// Re-exports for convenience
pub use box_model::{Corner, EdgeSizes, Point, Rect, Side, Size};
pub use boxes::{BoxId, BoxKind, BoxTree, LayoutBox, TreeError};
pub use cascade::{Cascade, DeclarationBlock, StyleSheet, correct_blocks};
pub use container::{ContainerOptions, InitialContainer};
pub use layout::{ApproximateFontMetrics, FontMetrics, LayoutContext, LineBox, LineId, layout_tree};
pub use paint::{Brush, Canvas, DisplayCommand, DisplayList, Painter};
pub use snapshot::{BoxSnapshot, WordSnapshot};
pub use style::{Font, GenericFamilies, Property};
pub use text::BoxWord;
pub use values::{Color, Length, LengthUnit, parse_length};
