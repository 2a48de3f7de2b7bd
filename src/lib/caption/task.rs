//! Module implementing the actual captioning task.

use std::io::Cursor;
use std::ops::Deref;
use std::sync::Arc;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use log::{debug, trace};

use crate::model::ImageMacro;
use crate::resources::{Font, Template};
use super::compositor;
use super::error::CaptionError;
use super::layout;
use super::output::CaptionOutput;
use super::text;


/// Represents a single captioning task and contains all the relevant logic.
///
/// All the code here is executed in a background thread,
/// and so it can be synchronous.
pub(super) struct CaptionTask {
    image_macro: ImageMacro,
    font: Arc<Font>,
}

impl Deref for CaptionTask {
    type Target = ImageMacro;
    fn deref(&self) -> &Self::Target {
        &self.image_macro  // makes the rendering code a little terser
    }
}

impl CaptionTask {
    #[inline]
    pub fn new(image_macro: ImageMacro, font: Arc<Font>) -> Self {
        CaptionTask{image_macro, font}
    }
}

impl CaptionTask {
    /// Perform the captioning task.
    pub fn perform(self) -> Result<CaptionOutput, CaptionError> {
        debug!("Rendering {:?}", self.image_macro);

        let template = Template::open(&self.template)?;
        let (width, height) = template.dimensions();
        trace!("Size of the template image {}: {}x{}", self.template.display(), width, height);

        let img = if self.has_text() {
            self.draw_texts(&template)?
        } else {
            debug!("No caption text, sending the template as is");
            template.image().to_rgba8()
        };

        let bytes = self.encode_result(DynamicImage::ImageRgba8(img))?;
        Ok(CaptionOutput::new(bytes, width, height))
    }

    /// Draw the captions onto a copy of the template image.
    fn draw_texts(&self, template: &Template) -> Result<RgbaImage, CaptionError> {
        let top = self.top_text.to_uppercase();
        let bottom = self.bottom_text.to_uppercase();
        text::check(&self.font, &top);
        text::check(&self.font, &bottom);

        let (width, height) = template.dimensions();
        let layout = layout::fit(width, height, &top, &bottom, &*self.font)?;
        trace!("Captions laid out as {:?}", layout);
        Ok(compositor::render(template.image(), &layout, &top, &bottom, &*self.font))
    }

    /// Encode final result as bytes of a PNG image.
    fn encode_result(&self, img: DynamicImage) -> Result<Vec<u8>, CaptionError> {
        debug!("Encoding final image as PNG...");
        let mut result = Cursor::new(vec![]);
        img.write_to(&mut result, ImageOutputFormat::Png)
            .map_err(CaptionError::Encode)?;
        Ok(result.into_inner())
    }
}
