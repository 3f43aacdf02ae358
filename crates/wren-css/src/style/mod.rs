//! Declared style: the property table, shorthand expansion and fonts.
//!
//! Boxes keep every property as the string it was declared with. The
//! helpers here classify the handful of keyword values layout branches on.

/// Font resolution and generic family mapping.
pub mod font;
/// The property table.
pub mod property;
/// Shorthand expansion.
pub mod shorthand;

pub use font::{DEFAULT_FONT_SIZE_PT, Font, GenericFamilies};
pub use property::{PROPERTY_TABLE, Property, PropertyDef};

/// [CSS 2.1 § 9.2.1 Block-level elements](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
///
/// Display values measured as blocks: positioned from the previous sibling
/// and sized from the containing block.
#[must_use]
pub fn is_block_level(display: &str) -> bool {
    matches!(
        display,
        "block" | "list-item" | "table" | "inline-table" | "table-cell"
    )
}

/// `table` and `inline-table`.
#[must_use]
pub fn is_table(display: &str) -> bool {
    matches!(display, "table" | "inline-table")
}

/// [CSS 2.1 § 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// Display values whose boxes act as containing blocks for their
/// descendants.
#[must_use]
pub fn establishes_containing_block(display: &str) -> bool {
    matches!(display, "block" | "table" | "table-cell")
}
