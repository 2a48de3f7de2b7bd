//! Defines the output of a captioning operation.

use std::ops::Deref;

use image::ImageFormat;
use mime::{self, Mime};


/// Output of the captioning process: an encoded PNG image.
#[derive(Clone, Debug)]
#[must_use = "unused caption output which must be used"]
pub struct CaptionOutput {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl CaptionOutput {
    #[inline]
    pub(super) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        CaptionOutput{bytes, width, height}
    }
}

impl CaptionOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    /// The MIME type that matches output's format.
    #[inline]
    pub fn mime_type(&self) -> Mime {
        mime::IMAGE_PNG
    }

    /// Width & height of the captioned image.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw bytes of the output.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for CaptionOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl From<CaptionOutput> for Vec<u8> {
    fn from(output: CaptionOutput) -> Self {
        output.into_bytes()
    }
}
