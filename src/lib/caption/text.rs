//! Module responsible for measuring & drawing caption text.

use std::collections::BTreeSet;
use std::fmt;

use image::{Pixel, RgbaImage};
use itertools::Itertools;
use log::{trace, warn};
use rusttype::{point, GlyphId, PositionedGlyph, Scale};

use crate::model::Color;
use crate::resources::Font;
use super::layout::Anchor;


/// Size of a rendered line of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

impl TextSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        TextSize{width, height}
    }
}


/// A typeface that single lines of text can be measured and drawn with
/// at an arbitrary integral pixel size.
pub trait Typeface {
    /// Measure the line of text rendered at given size.
    fn measure(&self, text: &str, size: u32) -> TextSize;

    /// Draw the line of text onto the image so that its bounding box
    /// starts at given anchor. Parts falling outside of the image are clipped.
    fn draw(&self, img: &mut RgbaImage, text: &str, size: u32, at: Anchor, color: Color);
}

impl Typeface for Font {
    fn measure(&self, text: &str, size: u32) -> TextSize {
        let style = Style::new(self, size);
        TextSize::new(style.text_width(text), style.line_height())
    }

    fn draw(&self, img: &mut RgbaImage, text: &str, size: u32, at: Anchor, color: Color) {
        let style = Style::new(self, size);
        trace!("Drawing {:?} at {:?} with {:?} in {}", text, at, style, color);

        let (width, height) = img.dimensions();
        for glyph in style.layout(text, at) {
            let bbox = match glyph.pixel_bounding_box() {
                Some(bbox) => bbox,
                None => continue,  // whitespace
            };
            glyph.draw(|x, y, v| {
                let x = bbox.min.x + x as i32;
                let y = bbox.min.y + y as i32;
                if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                    return;
                }
                let alpha = (v * 255.0).round() as u8;
                img.get_pixel_mut(x as u32, y as u32).blend(&color.to_rgba(alpha));
            });
        }
    }
}


/// Font instantiated at a particular pixel size.
struct Style<'f> {
    font: &'f Font,
    size: u32,
    scale: Scale,
}

impl<'f> Style<'f> {
    #[inline]
    fn new(font: &'f Font, size: u32) -> Self {
        Style{font, size, scale: Scale::uniform(size as f32)}
    }

    /// Height of a line of text, from the top of the tallest ascender
    /// to the bottom of the lowest descender.
    fn line_height(&self) -> u32 {
        let v_metrics = self.font.v_metrics(self.scale);
        (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32
    }

    /// Width of the text line, including the advance of its last glyph.
    fn text_width(&self, text: &str) -> u32 {
        self.layout(text, Anchor::new(0, 0)).last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .map(|w| w.ceil().max(0.0) as u32)
            .unwrap_or(0)
    }

    /// Lay out the text so that its line box starts at given anchor.
    fn layout(&self, text: &str, at: Anchor) -> Vec<PositionedGlyph<'static>> {
        let ascent = self.font.v_metrics(self.scale).ascent;
        let start = point(at.x as f32, at.y as f32 + ascent);
        self.font.layout(text, self.scale, start).collect()
    }
}

impl<'f> fmt::Debug for Style<'f> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Style")
            .field("font", &self.font)
            .field("size", &self.size)
            .finish()
    }
}


/// Code points of the text that the font has no glyphs for.
pub fn missing_glyphs(font: &Font, text: &str) -> BTreeSet<u32> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| font.glyph(c).id() == GlyphId(0))
        .map(|c| c as u32)
        .collect()
}

/// Check if given font has all the glyphs for given text.
pub fn check(font: &Font, text: &str) {
    let missing = missing_glyphs(font, text);
    if !missing.is_empty() {
        warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
            missing.iter().map(|c| format!("{:#x}", c)).join(", "));
    }
}


#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use image::{Rgba, RgbaImage};

    use crate::model::Color;
    use super::{TextSize, Typeface};
    use super::super::layout::Anchor;

    /// A single call to `Typeface::draw`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Stamp {
        pub text: String,
        pub size: u32,
        pub at: Anchor,
        pub color: Color,
    }

    /// Monospaced typeface with square glyphs: each character
    /// is exactly `size` pixels wide and high.
    ///
    /// Records every draw call and fills the text's bounding box.
    #[derive(Debug, Default)]
    pub struct BlockFace {
        stamps: RefCell<Vec<Stamp>>,
    }

    impl BlockFace {
        pub fn stamps(&self) -> Vec<Stamp> {
            self.stamps.borrow().clone()
        }
    }

    impl Typeface for BlockFace {
        fn measure(&self, text: &str, size: u32) -> TextSize {
            TextSize::new(text.chars().count() as u32 * size, size)
        }

        fn draw(&self, img: &mut RgbaImage, text: &str, size: u32, at: Anchor, color: Color) {
            self.stamps.borrow_mut().push(Stamp{text: text.to_owned(), size, at, color});

            let TextSize{width, height} = self.measure(text, size);
            let Color(r, g, b) = color;
            for y in at.y..at.y + height as i32 {
                for x in at.x..at.x + width as i32 {
                    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                        img.put_pixel(x as u32, y as u32, Rgba([r, g, b, 0xff]));
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use crate::model::Color;
    use crate::resources::Font;
    use crate::resources::font_path;
    use super::{missing_glyphs, Typeface};
    use super::super::layout::Anchor;

    fn font() -> Font {
        Font::open(font_path()).unwrap()
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(0, font().measure("", 40).width);
    }

    #[test]
    fn width_grows_with_text_and_size() {
        let font = font();
        let hello = font.measure("HELLO", 40);
        assert!(hello.width > 0);
        assert!(font.measure("HELLO WORLD", 40).width > hello.width);
        assert!(font.measure("HELLO", 80).width > hello.width);
    }

    #[test]
    fn height_depends_on_size_only() {
        let font = font();
        assert_eq!(font.measure("A", 40).height, font.measure("gjpq", 40).height);
        assert!(font.measure("A", 40).height >= 40);
    }

    #[test]
    fn draw_stays_within_text_box() {
        let font = font();
        let mut img = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 0xff]));
        let size = font.measure("HI", 30);
        font.draw(&mut img, "HI", 30, Anchor::new(50, 20), Color::WHITE);

        let mut drawn = 0;
        for (x, y, px) in img.enumerate_pixels() {
            if px[0] > 0 {
                drawn += 1;
                assert!(x >= 50 && x < 50 + size.width, "x = {} out of text box", x);
                assert!(y >= 20 && y < 20 + size.height, "y = {} out of text box", y);
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn draw_clips_to_image() {
        let font = font();
        let mut img = RgbaImage::new(10, 10);
        font.draw(&mut img, "CLIPPED", 50, Anchor::new(-20, -20), Color::WHITE);
    }

    #[test]
    fn reports_missing_glyphs() {
        let font = font();
        assert!(missing_glyphs(&font, "HELLO WORLD").is_empty());
        assert_eq!(vec![0x6f22], missing_glyphs(&font, "A漢B").into_iter().collect::<Vec<_>>());
    }
}
