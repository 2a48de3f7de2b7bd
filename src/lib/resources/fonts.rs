//! Module for loading the font that captions are rendered with.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use super::filesystem::extension;


/// Extensions of font files that can be loaded.
pub const FILE_EXTENSIONS: &[&str] = &["otf", "ttf"];


/// Font that captions are rendered with.
///
/// A single font is loaded at startup and shared by all captioning tasks.
/// It is instantiated at a particular pixel size only when measuring
/// or drawing text (see `caption::Typeface`).
pub struct Font(rusttype::Font<'static>);

impl Font {
    /// Load the font from a TrueType / OpenType file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let known_extension = extension(path)
            .map(|ext| FILE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);
        if !known_extension {
            warn!("Font file {} doesn't look like a TrueType or OpenType font", path.display());
        }

        let bytes = fs::read(path).map_err(|e| FontError::Io(path.to_owned(), e))?;
        let font = Self::from_bytes(bytes)?;
        debug!("Font {} loaded successfully", path.display());
        Ok(font)
    }

    /// Create the font from the content of a font file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        rusttype::Font::try_from_vec(bytes).map(Font).ok_or(FontError::Invalid)
    }
}

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyphs)", self.0.glyph_count())
    }
}


/// Error while loading the font.
#[derive(Debug, Error)]
pub enum FontError {
    /// Font file could not be read.
    #[error("cannot read font file {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),
    /// Font data is not a usable font.
    #[error("invalid font data")]
    Invalid,
}


#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use spectral::prelude::*;

    use super::{Font, FontError};

    /// Path to the font bundled with the repository.
    pub fn font_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..").join("..").join("data").join("fonts").join("DejaVuSans-Bold.ttf")
    }

    #[test]
    fn open_bundled_font() {
        assert_that!(Font::open(font_path())).is_ok();
    }

    #[test]
    fn missing_file() {
        assert!(matches!(Font::open("/nonexistent/Impact.ttf"), Err(FontError::Io(..))));
    }

    #[test]
    fn garbage_bytes() {
        assert!(matches!(Font::from_bytes(b"definitely not a font".to_vec()),
            Err(FontError::Invalid)));
    }
}
