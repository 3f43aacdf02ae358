//! Common utilities for the Wren layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - colored, de-duplicated terminal output for
//!   recoverable problems (bad lengths, missing images, unknown properties)
//! - **Images** - decoded image data handed to layout and painting
//! - **Resources** - the resolver capability that turns `src`/`href`
//!   strings into image bytes, stylesheet text, or link activation

pub mod image;
pub mod resource;
pub mod warning;
