//! Image data shared between layout and painting.
//!
//! Layout only needs an image's intrinsic size; the raster backend also
//! needs its pixels. Both read the same [`LoadedImage`].

use crate::resource::ResourceError;

/// Side length of the blank image substituted for one that failed to load.
pub const PLACEHOLDER_SIZE: u32 = 50;

/// Decoded image data for an `<img>` source.
///
/// Contains the decoded RGBA pixel data and intrinsic dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    rgba_data: Vec<u8>,
}

impl LoadedImage {
    /// Create a new `LoadedImage` from decoded RGBA pixel data.
    ///
    /// # Arguments
    ///
    /// * `width` - Intrinsic width of the image in pixels
    /// * `height` - Intrinsic height of the image in pixels
    /// * `rgba_data` - Raw RGBA pixel data (must be `width * height * 4` bytes)
    #[must_use]
    pub const fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba_data,
        }
    }

    /// Decode PNG, JPEG, GIF, BMP, ... bytes into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the format is not recognized or
    /// the data is corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self, ResourceError> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| ResourceError::Decode(e.to_string()))?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::new(width, height, rgba.into_raw()))
    }

    /// A fully transparent stand-in for an image that could not be loaded.
    #[must_use]
    pub fn placeholder() -> Self {
        let bytes = (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4) as usize;
        Self::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, vec![0; bytes])
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic dimensions as `(width, height)` in `f32`, for layout.
    #[must_use]
    pub fn dimensions_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_fifty_square() {
        let img = LoadedImage::placeholder();
        assert_eq!(img.width(), 50);
        assert_eq!(img.height(), 50);
        assert_eq!(img.rgba_data().len(), 50 * 50 * 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(LoadedImage::decode(b"not an image").is_err());
    }
}
