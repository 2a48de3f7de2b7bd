//! Module implementing the `Color` type.

use std::fmt;

use image::Rgba;


/// RGB color that captions and their outlines are drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color(0x00, 0x00, 0x00);

    /// The color with every channel inverted.
    #[inline]
    pub fn invert(self) -> Self {
        let Color(r, g, b) = self;
        Color(!r, !g, !b)
    }

    /// Pixel of this color with given opacity.
    #[inline]
    pub(crate) fn to_rgba(self, alpha: u8) -> Rgba<u8> {
        let Color(r, g, b) = self;
        Rgba([r, g, b, alpha])
    }
}

impl From<Color> for Rgba<u8> {
    #[inline]
    fn from(color: Color) -> Rgba<u8> {
        color.to_rgba(0xff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let Color(r, g, b) = *self;
        write!(fmt, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}


#[cfg(test)]
mod tests {
    use image::Rgba;
    use super::Color;
    use super::super::{DEFAULT_COLOR, DEFAULT_OUTLINE_COLOR};

    #[test]
    fn outline_contrasts_with_text() {
        assert_eq!(DEFAULT_OUTLINE_COLOR, DEFAULT_COLOR.invert());
        assert_eq!(Color::WHITE, DEFAULT_COLOR);
    }

    #[test]
    fn display_as_hex() {
        assert_eq!("#ff8000", Color(0xff, 0x80, 0x00).to_string());
        assert_eq!("#000000", Color::BLACK.to_string());
    }

    #[test]
    fn translucent_pixel() {
        assert_eq!(Rgba([1, 2, 3, 0x80]), Color(1, 2, 3).to_rgba(0x80));
        assert_eq!(Rgba([1, 2, 3, 0xff]), Rgba::from(Color(1, 2, 3)));
    }
}
