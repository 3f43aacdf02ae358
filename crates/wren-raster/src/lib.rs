//! Software raster backend for the Wren layout engine.
//!
//! Executes paint calls onto a pixel buffer: geometry through `tiny-skia`,
//! glyphs through `fontdue`, and PNG output through `image`.
//!
//! # Architecture
//!
//! The raster backend is the final stage in the pipeline:
//!
//! ```text
//! Cascade → Layout → Paint → Raster
//!                     ↓        ↓
//!                  Canvas → Pixels
//! ```
//!
//! It knows nothing about CSS or the box tree. [`PixmapCanvas`] implements
//! [`wren_css::Canvas`], and [`FontdueFontMetrics`] implements
//! [`wren_css::FontMetrics`] against the same faces, so measured text and
//! drawn text agree.

mod canvas;
mod error;
mod font_metrics;
mod fonts;
mod renderer;

pub use canvas::PixmapCanvas;
pub use error::RasterError;
pub use font_metrics::FontdueFontMetrics;
pub use fonts::FontSet;
pub use renderer::Renderer;
