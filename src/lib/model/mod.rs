//! Module defining the model types.

mod color;
mod command;
mod constants;
mod image_macro;

pub use self::color::Color;
pub use self::command::{Command, ParsedCommand};
pub use self::constants::{DEFAULT_COLOR, DEFAULT_OUTLINE_COLOR};
pub use self::image_macro::ImageMacro;
