//! Font faces available to the raster backend.
//!
//! Faces are picked by weight and style only. A `font-family` is not
//! matched against the faces on disk.

use std::path::Path;

use fontdue::{Font, FontSettings};
use wren_common::warning::{Component, warn_once};

use crate::error::RasterError;

/// Common system font paths to search for a regular face.
const REGULAR_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold faces.
const BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic faces.
const ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic faces.
const BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Up to four faces of one family.
///
/// A missing face falls back: bold-italic to bold, italic or regular; bold
/// and italic to regular. An empty set draws no text.
#[derive(Default)]
pub struct FontSet {
    regular: Option<Font>,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl FontSet {
    /// Faces found at the usual system locations.
    ///
    /// Reports once if no regular face was found.
    #[must_use]
    pub fn system() -> Self {
        let set = Self {
            regular: load_first(REGULAR_SEARCH_PATHS),
            bold: load_first(BOLD_SEARCH_PATHS),
            italic: load_first(ITALIC_SEARCH_PATHS),
            bold_italic: load_first(BOLD_ITALIC_SEARCH_PATHS),
        };
        if set.is_empty() {
            warn_once(
                Component::Paint,
                "no system font found; text is measured approximately and not drawn",
            );
        }
        set
    }

    /// A set holding one regular face read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::FontIo`] if the file cannot be read and
    /// [`RasterError::FontParse`] if it is not a font.
    pub fn from_file(path: &Path) -> Result<Self, RasterError> {
        let data = std::fs::read(path).map_err(|source| RasterError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    /// A set holding one regular face.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::FontParse`] if `data` is not a font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RasterError> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| RasterError::FontParse(e.to_string()))?;
        Ok(Self {
            regular: Some(font),
            ..Self::default()
        })
    }

    /// Whether there is no regular face.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regular.is_none()
    }

    /// The best face for `font`'s weight and style.
    #[must_use]
    pub fn select(&self, font: &wren_css::Font) -> Option<&Font> {
        match (font.bold, font.italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            (true, false) => self.bold.as_ref().or(self.regular.as_ref()),
            (false, true) => self.italic.as_ref().or(self.regular.as_ref()),
            (false, false) => self.regular.as_ref(),
        }
    }
}

fn load_first(paths: &[&str]) -> Option<Font> {
    paths.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        Font::from_bytes(data, FontSettings::default()).ok()
    })
}
