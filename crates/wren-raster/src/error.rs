use std::path::PathBuf;

use thiserror::Error;

/// Failures of the raster backend.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A canvas needs a non-zero width and height.
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A font file could not be read.
    #[error("failed to read font '{path}': {source}")]
    FontIo {
        /// The font file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Font bytes were read but fontdue rejected them.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// Writing the output image failed.
    #[error("failed to save '{path}': {source}")]
    Save {
        /// The output path.
        path: PathBuf,
        /// The encoder failure.
        #[source]
        source: image::ImageError,
    },
}
