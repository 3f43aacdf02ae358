//! Markup scanning for the Wren layout engine.
//!
//! # Scope
//!
//! This crate turns raw document text into the flat token stream the box
//! tree is built from:
//! - **Tags** ([`Tag`]): lower-cased name, ordered attribute list, closing
//!   and void flags
//! - **Text runs**: the characters between two tags, with character
//!   references decoded
//!
//! There is no tree construction here. Nesting, implicit closing and
//! recovery from unmatched tags are the box tree's business.
//!
//! # Not Implemented
//!
//! - The WHATWG insertion modes
//! - Numeric references outside the Unicode scalar range
//! - CDATA sections

/// Named and numeric character reference decoding.
pub mod entities;
/// The document scanner and its token type.
pub mod scanner;
/// Tag parsing and attribute access.
pub mod tag;

pub use scanner::{DocumentTokenizer, MarkupScanner, MarkupToken};
pub use tag::{Attribute, Tag};
