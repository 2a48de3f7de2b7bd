//! Module implementing the `ImageMacro` type.

use std::fmt;
use std::path::PathBuf;


/// Describes a meme to compose: the base image file and its two captions.
/// Used as an input structure of the captioning `Engine`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ImageMacro {
    /// Path to the base image.
    pub template: PathBuf,
    /// Text drawn flush with the top edge. May be empty.
    pub top_text: String,
    /// Text drawn flush with the bottom edge. May be empty.
    pub bottom_text: String,
}

impl ImageMacro {
    #[inline]
    pub fn new<P, T, B>(template: P, top_text: T, bottom_text: B) -> Self
        where P: Into<PathBuf>, T: Into<String>, B: Into<String>
    {
        ImageMacro{
            template: template.into(),
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
        }
    }

    /// Whether the image macro includes any text.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.top_text.is_empty() || !self.bottom_text.is_empty()
    }
}

impl fmt::Debug for ImageMacro {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ImageMacro");
        ds.field("template", &self.template);
        if !self.top_text.is_empty() {
            ds.field("top_text", &self.top_text);
        }
        if !self.bottom_text.is_empty() {
            ds.field("bottom_text", &self.bottom_text);
        }
        ds.finish()
    }
}
