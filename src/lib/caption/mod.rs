//! Module implementing meme captioning: fitting the captions
//! and drawing them, outlined, onto the base image.

mod compositor;
mod engine;
mod error;
mod layout;
mod output;
mod task;
mod text;


pub use self::compositor::{outline_offsets, render, OUTLINE_DIVISOR};
pub use self::engine::Engine;
pub use self::error::CaptionError;
pub use self::layout::{fit, Anchor, Layout, LayoutError, HORIZONTAL_MARGIN, INITIAL_SIZE_DIVISOR};
pub use self::output::CaptionOutput;
pub use self::text::{check as check_glyphs, missing_glyphs, TextSize, Typeface};
