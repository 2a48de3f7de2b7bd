//! Module implementing the builder for the dispatcher's `Config`.

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::caption::Engine;
use crate::command::{CommandParser, DEFAULT_PREFIX};
use crate::resources::{Catalog, CatalogError, Font, FontError, InvalidArgumentPool, PoolError};
use super::config::Config;


/// Builder for the dispatcher's `Config`.
///
/// Setters only record the settings. Resources are loaded in `build`,
/// and any failure there means the bot cannot serve requests at all.
#[derive(Debug, Default)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    errors: Vec<BuildError>,

    prefix: Option<String>,
    catalog: Option<CatalogSource>,
    template_directory: Option<PathBuf>,
    font_file: Option<PathBuf>,
    invalid_directory: Option<PathBuf>,
    artifact_directory: Option<PathBuf>,
    render_threads: Option<usize>,
}

/// Where the catalog comes from.
#[derive(Debug)]
enum CatalogSource {
    File(PathBuf),
    Ready(Catalog),
}

impl Builder {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}

// Setters.
impl Builder {
    /// Set the prefix that commands must start with.
    #[inline]
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = Some(prefix.into()); self
    }

    /// Set the JSON file that maps meme names to their image files.
    pub fn catalog_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        if let Some(CatalogSource::Ready(_)) = self.catalog {
            return self.err(BuildError::Conflict("catalog"));
        }
        self.catalog = Some(CatalogSource::File(path.as_ref().to_owned())); self
    }

    /// Use a catalog that has already been loaded.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        if self.catalog.is_some() || self.template_directory.is_some() {
            return self.err(BuildError::Conflict("catalog"));
        }
        self.catalog = Some(CatalogSource::Ready(catalog)); self
    }

    /// Set the directory that image files in the catalog are relative to.
    ///
    /// By default, it's the directory of the catalog file.
    pub fn template_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        if let Some(CatalogSource::Ready(_)) = self.catalog {
            return self.err(BuildError::Conflict("template directory"));
        }
        self.template_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the font file that captions are rendered with.
    #[inline]
    pub fn font_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font_file = Some(path.as_ref().to_owned()); self
    }

    /// Set the directory with fallback "argument invalid" images.
    #[inline]
    pub fn invalid_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.invalid_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the directory where composed memes are written before delivery.
    #[inline]
    pub fn artifact_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.artifact_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the number of threads that render memes (0 means one per CPU).
    #[inline]
    pub fn render_threads(mut self, count: usize) -> Self {
        self.render_threads = Some(count); self
    }
}

// Validation & building.
impl Builder {
    /// Load all the resources and build the `Config`.
    pub fn build(mut self) -> Result<Config, BuildError> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }

        let prefix = self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_owned());
        let parser = CommandParser::new(prefix)?;

        let catalog = match self.catalog {
            Some(CatalogSource::Ready(catalog)) => catalog,
            Some(CatalogSource::File(path)) => {
                let directory = self.template_directory
                    .or_else(|| path.parent().map(Path::to_owned))
                    .unwrap_or_default();
                Catalog::from_file(&path, directory)?
            }
            None => return Err(BuildError::Missing("catalog")),
        };
        if catalog.is_empty() {
            info!("Meme catalog is empty, only fallback images can be sent");
        }

        let font_file = self.font_file.ok_or(BuildError::Missing("font file"))?;
        let font = Font::open(font_file)?;

        let invalid_directory = self.invalid_directory
            .ok_or(BuildError::Missing("directory with fallback images"))?;
        let pool = InvalidArgumentPool::load(invalid_directory)?;

        let engine = Engine::new(font, self.render_threads.unwrap_or(0))
            .map_err(BuildError::ThreadPool)?;

        debug!("Dispatcher configured with {} meme(s) & {} fallback image(s)",
            catalog.len(), pool.len());
        Ok(Config{
            parser, catalog, pool, engine,
            artifact_directory: self.artifact_directory,
        })
    }

    #[doc(hidden)]
    fn err(mut self, error: BuildError) -> Self {
        self.errors.push(error); self
    }
}


/// Error while setting up the dispatcher.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Required setting was not provided.
    #[error("no {0} configured")]
    Missing(&'static str),
    /// Settings were given that contradict each other.
    #[error("conflicting configuration of the {0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Command prefix made for invalid patterns.
    #[error("invalid command prefix: {0}")]
    Parser(#[from] regex::Error),
    /// Rendering threads could not be started.
    #[error("cannot start rendering threads: {0}")]
    ThreadPool(#[source] io::Error),
}
