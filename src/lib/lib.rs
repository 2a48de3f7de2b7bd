//!
//! memebot  -- Memes on demand, for chat bots
//!

#[cfg(test)] #[macro_use] extern crate spectral;


mod caption;
mod command;
mod dispatch;
mod model;
mod resources;


pub use caption::*;
pub use command::*;
pub use dispatch::*;
pub use model::*;
pub use resources::*;
