//! The box tree.
//!
//! [CSS 2.1 § 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! Boxes live in an arena ([`BoxTree`]) and refer to each other by
//! [`BoxId`]. Parent links, child lists and the line boxes created by layout
//! are all indices, so layout can walk and mutate the tree freely.
//!
//! The tree is split by concern:
//!
//! - [`tree`]: allocation, structure and declared properties
//! - [`computed`]: memoized actual values (lengths, colors, fonts)
//! - [`geometry`]: edge arithmetic and whole-subtree queries

/// Memoized actual values.
pub mod computed;
/// Edge arithmetic and subtree queries.
pub mod geometry;
/// The box record.
pub mod layout_box;
/// The arena.
pub mod tree;

pub use layout_box::{BoxKind, LayoutBox};
pub use tree::{Ancestors, BoxId, BoxTree, TreeError};
