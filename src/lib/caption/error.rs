//! Captioning error.

use image::ImageError;
use thiserror::Error;

use crate::resources::TemplateError;
use super::layout::LayoutError;


/// Error that may occur during the captioning.
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Base image could not be loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Captions could not be fitted onto the image.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Final image could not be encoded.
    #[error("failed to encode the final image: {0}")]
    Encode(#[source] ImageError),
}
