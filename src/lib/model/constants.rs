//! Module defining constants relevant to the data model.

use super::color::Color;


/// Color of the caption text.
pub const DEFAULT_COLOR: Color = Color::WHITE;
/// Color of the outline stamped beneath caption text.
pub const DEFAULT_OUTLINE_COLOR: Color = Color::BLACK;
