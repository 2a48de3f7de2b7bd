//! Module handling meme base images ("templates").

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{self, DynamicImage, GenericImageView, ImageError, ImageFormat};
use lazy_static::lazy_static;
use log::trace;
use maplit::hashmap;
use thiserror::Error;

use super::filesystem::extension;


lazy_static! {
    /// Map of image file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// Base image of a meme.
///
/// The image is never modified; captions are drawn on a copy.
#[derive(Clone)]
pub struct Template {
    image: DynamicImage,
    path: PathBuf,
}

impl Template {
    /// Load the template from an image file.
    ///
    /// The file is decoded in the format implied by its extension,
    /// or in whatever format its content suggests if the extension is unknown.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let image = match format_of(path) {
            Some(format) => {
                trace!("Opening {:?} image {}", format, path.display());
                File::open(path).map_err(ImageError::IoError)
                    .and_then(|f| image::load(BufReader::new(f), format))
            }
            None => {
                trace!("Opening image {} of unknown format", path.display());
                image::io::Reader::open(path).map_err(ImageError::IoError)
                    .and_then(|r| r.with_guessed_format().map_err(ImageError::IoError))
                    .and_then(|r| r.decode())
            }
        };
        let image = image.map_err(|e| TemplateError::Open(path.to_owned(), e))?;
        Ok(Template::new(image, path))
    }

    #[inline]
    pub fn new<P: Into<PathBuf>>(image: DynamicImage, path: P) -> Self {
        Template{image, path: path.into()}
    }
}

impl Template {
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Image format implied by the file's extension.
fn format_of(path: &Path) -> Option<ImageFormat> {
    extension(path).and_then(|ext| IMAGE_FORMAT_EXTENSIONS.get(ext.as_str()).copied())
}

impl fmt::Debug for Template {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(fmt, "Template({}x{}, {:?})", width, height, self.path)
    }
}


/// Error while loading a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Image file could not be opened or decoded.
    #[error("cannot open image {}: {}", .0.display(), .1)]
    Open(PathBuf, #[source] ImageError),
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use image::{ImageFormat, Rgba, RgbaImage};
    use spectral::prelude::*;
    use tempfile::TempDir;

    use super::{format_of, Template, TemplateError};

    #[test]
    fn open_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sap.png");
        RgbaImage::from_pixel(30, 20, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let template = Template::open(&path).unwrap();
        assert_eq!((30, 20), template.dimensions());
    }

    #[test]
    fn format_follows_extension() {
        assert_that!(format_of(Path::new("a/aliens.JPG"))).is_some().is_equal_to(&ImageFormat::Jpeg);
        assert_that!(format_of(Path::new("sap.gif"))).is_some().is_equal_to(&ImageFormat::Gif);
        assert_that!(format_of(Path::new("sap.bmp"))).is_none();
        assert_that!(format_of(Path::new("sap"))).is_none();
    }

    #[test]
    fn decoded_in_format_of_extension() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("sap.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])).save(&png).unwrap();
        let mislabeled = dir.path().join("sap.jpg");
        fs::copy(&png, &mislabeled).unwrap();

        assert!(matches!(Template::open(&mislabeled), Err(TemplateError::Open(..))));
    }

    #[test]
    fn unknown_extension_is_sniffed() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("sap.png");
        RgbaImage::from_pixel(6, 5, Rgba([0, 0, 0, 255])).save(&png).unwrap();
        let unlabeled = dir.path().join("sap.img");
        fs::copy(&png, &unlabeled).unwrap();

        assert_eq!((6, 5), Template::open(&unlabeled).unwrap().dimensions());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(Template::open("/nonexistent/aliens.jpg"),
            Err(TemplateError::Open(..))));
    }
}
