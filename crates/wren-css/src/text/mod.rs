//! Words: the unit of inline layout.
//!
//! A box's text is split into [`BoxWord`]s once, when the text is set.
//! Each word is measured on first layout and then positioned by the line
//! flow of its nearest block ancestor.

/// White-space aware splitting.
pub mod splitter;
/// The positioned word.
pub mod word;

pub use splitter::{collapses_white_space, eliminates_line_breaks, split_words};
pub use word::BoxWord;
