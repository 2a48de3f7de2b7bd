//! Module with the dispatcher's configuration.

use std::path::{Path, PathBuf};

use crate::caption::Engine;
use crate::command::CommandParser;
use crate::resources::{Catalog, InvalidArgumentPool};


/// Everything the `Dispatcher` needs to serve requests.
///
/// It's put together by `Builder` before any request is handled
/// and never changes afterwards.
#[derive(Debug)]
pub struct Config {
    pub(super) parser: CommandParser,
    pub(super) catalog: Catalog,
    pub(super) pool: InvalidArgumentPool,
    pub(super) engine: Engine,
    pub(super) artifact_directory: Option<PathBuf>,
}

impl Config {
    #[inline]
    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn pool(&self) -> &InvalidArgumentPool {
        &self.pool
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Where composed memes are written to before delivery.
    /// `None` means the system's temporary directory.
    #[inline]
    pub fn artifact_directory(&self) -> Option<&Path> {
        self.artifact_directory.as_deref()
    }
}
