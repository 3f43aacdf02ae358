//! Resolution of `src` / `href` strings into engine resources.
//!
//! The layout engine never touches the filesystem itself. Tree construction
//! is handed a [`ResourceResolver`] and asks it for three things:
//!
//! - image bytes for `<img src=...>`
//! - stylesheet text for `<link rel=stylesheet href=...>`
//! - activation of a hyperlink target (`<a href=...>`)
//!
//! Network fetch is intentionally absent; [`FileResolver`] understands
//! filesystem paths and `data:` URLs only.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use thiserror::Error;

use crate::image::LoadedImage;

/// Why a resource could not be produced.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The location names nothing the resolver knows how to read.
    #[error("unsupported resource location '{0}'")]
    Unsupported(String),

    /// Reading from disk failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A `data:` URL was malformed or its payload did not decode.
    #[error("invalid data URL: {0}")]
    DataUrl(String),

    /// The bytes were read but are not a decodable image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Stylesheet bytes are not UTF-8.
    #[error("stylesheet '{0}' is not valid UTF-8")]
    Encoding(String),
}

/// Host-supplied capability for loading images, stylesheets and following
/// links.
///
/// Every method may fail; callers degrade instead of aborting layout (a
/// placeholder image, an empty stylesheet, an ignored click).
pub trait ResourceResolver {
    /// Load and decode the image at `src`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if the image cannot be read or decoded.
    fn image(&self, src: &str) -> Result<LoadedImage, ResourceError>;

    /// Load the stylesheet text at `href`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if the stylesheet cannot be read.
    fn stylesheet(&self, href: &str) -> Result<String, ResourceError>;

    /// Follow a hyperlink.
    ///
    /// # Errors
    ///
    /// Returns a [`ResourceError`] if the target cannot be activated.
    fn activate_link(&self, href: &str) -> Result<(), ResourceError>;
}

/// A resolver that resolves nothing.
///
/// Useful for documents without external resources, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl ResourceResolver for NullResolver {
    fn image(&self, src: &str) -> Result<LoadedImage, ResourceError> {
        Err(ResourceError::Unsupported(src.to_string()))
    }

    fn stylesheet(&self, href: &str) -> Result<String, ResourceError> {
        Err(ResourceError::Unsupported(href.to_string()))
    }

    fn activate_link(&self, href: &str) -> Result<(), ResourceError> {
        Err(ResourceError::Unsupported(href.to_string()))
    }
}

/// Resolves relative paths against a base directory, plus `data:` URLs.
#[derive(Debug, Clone)]
pub struct FileResolver {
    base_dir: PathBuf,
}

impl FileResolver {
    /// Create a resolver rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory relative paths are resolved against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, location: &str) -> Result<PathBuf, ResourceError> {
        let location = location.strip_prefix("file://").unwrap_or(location);
        if location.contains("://") {
            return Err(ResourceError::Unsupported(location.to_string()));
        }
        let path = Path::new(location);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.base_dir.join(path))
        }
    }

    fn read_bytes(&self, location: &str) -> Result<Vec<u8>, ResourceError> {
        if location.starts_with("data:") {
            return decode_data_url(location);
        }
        let path = self.path_for(location)?;
        fs::read(&path).map_err(|source| ResourceError::Io { path, source })
    }
}

impl ResourceResolver for FileResolver {
    fn image(&self, src: &str) -> Result<LoadedImage, ResourceError> {
        let bytes = self.read_bytes(src)?;
        LoadedImage::decode(&bytes)
    }

    fn stylesheet(&self, href: &str) -> Result<String, ResourceError> {
        let bytes = self.read_bytes(href)?;
        String::from_utf8(bytes).map_err(|_| ResourceError::Encoding(href.to_string()))
    }

    fn activate_link(&self, href: &str) -> Result<(), ResourceError> {
        // A file resolver has nowhere to navigate to; it only checks the
        // target exists so the host can decide what to do with it.
        let path = self.path_for(href)?;
        if path.exists() {
            Ok(())
        } else {
            Err(ResourceError::Io {
                path,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }
}

/// Decode a `data:` URL and return its payload as raw bytes.
///
/// Base64 payloads (`data:<type>;base64,<payload>`) are decoded; anything
/// else is taken as literal text.
///
/// # Errors
///
/// Returns [`ResourceError::DataUrl`] if the URL has no payload separator or
/// the base64 payload is invalid.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ResourceError> {
    let data_url = url.trim_start_matches("data:");
    let Some((metadata, data)) = data_url.split_once(',') else {
        return Err(ResourceError::DataUrl("missing comma".to_string()));
    };

    if metadata.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|e| ResourceError::DataUrl(format!("base64 decode error: {e}")))
    } else {
        Ok(data.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_data_url() {
        let bytes = decode_data_url("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_plain_data_url() {
        let bytes = decode_data_url("data:text/css,p{color:red}").unwrap();
        assert_eq!(bytes, b"p{color:red}");
    }

    #[test]
    fn test_decode_data_url_without_comma() {
        assert!(matches!(
            decode_data_url("data:text/plain;base64"),
            Err(ResourceError::DataUrl(_))
        ));
    }

    #[test]
    fn test_null_resolver_fails_everything() {
        let r = NullResolver;
        assert!(r.image("a.png").is_err());
        assert!(r.stylesheet("a.css").is_err());
        assert!(r.activate_link("a.html").is_err());
    }

    #[test]
    fn test_file_resolver_rejects_network_urls() {
        let r = FileResolver::new(".");
        assert!(matches!(
            r.stylesheet("https://example.com/a.css"),
            Err(ResourceError::Unsupported(_))
        ));
    }

    #[test]
    fn test_file_resolver_reads_data_url_stylesheet() {
        let r = FileResolver::new(".");
        let css = r.stylesheet("data:text/css;base64,cHtjb2xvcjpyZWR9").unwrap();
        assert_eq!(css, "p{color:red}");
    }
}
