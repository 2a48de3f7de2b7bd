//! Module implementing the auto-fit layout of captions.

use log::{debug, trace};
use thiserror::Error;

use super::text::Typeface;


/// Horizontal space (in pixels) that captions must leave free
/// across the width of the image.
pub const HORIZONTAL_MARGIN: u32 = 20;

/// The font size search starts at image height divided by this.
pub const INITIAL_SIZE_DIVISOR: u32 = 5;


/// Top-left pixel coordinate where a caption's line box begins.
///
/// Coordinates can be negative when a caption overhangs the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Anchor{x, y}
    }

    /// Anchor shifted by given offsets.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Anchor::new(self.x + dx, self.y + dy)
    }
}


/// Result of fitting both captions onto an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Font size shared by both captions.
    pub font_size: u32,
    /// Where the top caption starts. Always flush with the top edge.
    pub top: Anchor,
    /// Where the bottom caption starts. Always flush with the bottom edge.
    pub bottom: Anchor,
}


/// Find the largest font size at which both captions fit
/// within the width of the image (less the margin), and position them.
///
/// The search goes down one size at a time, starting from a fifth of image height.
/// Caption height isn't constrained.
pub fn fit<T>(width: u32, height: u32,
              top: &str, bottom: &str, typeface: &T) -> Result<Layout, LayoutError>
    where T: Typeface + ?Sized
{
    let max_width = width as i64 - HORIZONTAL_MARGIN as i64;
    let fits = |w: u32| w as i64 <= max_width;

    let mut font_size = height / INITIAL_SIZE_DIVISOR;
    let (top_size, bottom_size) = loop {
        if font_size == 0 {
            debug!("Captions don't fit on a {}x{} image at any font size", width, height);
            return Err(LayoutError::Degenerate{width, height});
        }
        let top_size = typeface.measure(top, font_size);
        let bottom_size = typeface.measure(bottom, font_size);
        trace!("At font size {}, captions are {}px & {}px wide (maximum is {})",
            font_size, top_size.width, bottom_size.width, max_width);
        if fits(top_size.width) && fits(bottom_size.width) {
            break (top_size, bottom_size);
        }
        font_size -= 1;
    };
    debug!("Font size for a {}x{} image: {}", width, height, font_size);

    let centered = |text_width: u32| ((width as i64 - text_width as i64) / 2) as i32;
    Ok(Layout{
        font_size,
        top: Anchor::new(centered(top_size.width), 0),
        bottom: Anchor::new(centered(bottom_size.width),
                            height as i32 - bottom_size.height as i32),
    })
}


/// Error while laying out the captions.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// No positive font size makes the captions fit.
    #[error("captions cannot fit on a {width}x{height} image")]
    Degenerate { width: u32, height: u32 },
}
