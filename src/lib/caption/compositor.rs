//! Module which draws the outlined captions onto the base image.

use image::{DynamicImage, RgbaImage};
use itertools::iproduct;
use log::trace;

use crate::model::{DEFAULT_COLOR, DEFAULT_OUTLINE_COLOR};
use super::layout::Layout;
use super::text::Typeface;


/// Outline thickness is the font size divided by this.
pub const OUTLINE_DIVISOR: u32 = 15;


/// Offsets of the outline stamps drawn beneath a caption at given font size.
///
/// Both coordinates range over `thickness - 1` and `thickness`,
/// which gives four stamps shifted diagonally towards bottom right.
pub fn outline_offsets(font_size: u32) -> Vec<(i32, i32)> {
    let thickness = (font_size / OUTLINE_DIVISOR) as i32;
    iproduct!(thickness - 1..=thickness, thickness - 1..=thickness).collect()
}

/// Render upper-cased captions onto a copy of the base image.
///
/// Every outline stamp of both captions is drawn first,
/// followed by the captions themselves at their exact anchors.
pub fn render<T>(base: &DynamicImage, layout: &Layout,
                 top: &str, bottom: &str, typeface: &T) -> RgbaImage
    where T: Typeface + ?Sized
{
    let mut img = base.to_rgba8();
    let top = top.to_uppercase();
    let bottom = bottom.to_uppercase();
    let size = layout.font_size;

    for (dx, dy) in outline_offsets(size) {
        trace!("Outline stamp at offset ({}, {})", dx, dy);
        typeface.draw(&mut img, &top, size, layout.top.offset(dx, dy), DEFAULT_OUTLINE_COLOR);
        typeface.draw(&mut img, &bottom, size, layout.bottom.offset(dx, dy), DEFAULT_OUTLINE_COLOR);
    }
    typeface.draw(&mut img, &top, size, layout.top, DEFAULT_COLOR);
    typeface.draw(&mut img, &bottom, size, layout.bottom, DEFAULT_COLOR);

    img
}
