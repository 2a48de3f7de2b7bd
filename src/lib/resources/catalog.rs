//! Module implementing the catalog of meme base images.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, trace, warn};
use regex::Regex;
use serde_json::{self, Value as Json};
use thiserror::Error;


/// Meme known to the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    identifier: String,
    image_path: PathBuf,
}

impl CatalogEntry {
    /// Lower-cased identifier of the meme.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Path to the base image file.
    #[inline]
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }
}


/// Maps case-insensitive meme identifiers to their base image files.
///
/// The catalog is loaded once and never changes afterwards,
/// so it can be shared between concurrent requests without locking.
/// Entries keep the order they were loaded in.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

// Loading.
impl Catalog {
    /// Load the catalog from a JSON file with an object
    /// that maps meme identifiers to file names.
    ///
    /// Relative file names are resolved against `directory`.
    pub fn from_file<P, D>(path: P, directory: D) -> Result<Self, CatalogError>
        where P: AsRef<Path>, D: AsRef<Path>
    {
        let path = path.as_ref();
        debug!("Loading meme catalog from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), directory)
    }

    /// Load the catalog from a reader of the JSON mapping.
    pub fn from_reader<R, D>(reader: R, directory: D) -> Result<Self, CatalogError>
        where R: Read, D: AsRef<Path>
    {
        let directory = directory.as_ref();
        let mapping = match serde_json::from_reader::<_, Json>(reader)? {
            Json::Object(mapping) => mapping,
            _ => return Err(CatalogError::NotAnObject),
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (identifier, filename) in mapping {
            let filename = match filename {
                Json::String(f) => f,
                _ => return Err(CatalogError::InvalidFilename(identifier)),
            };
            entries.push((identifier, directory.join(filename)));
        }
        Self::from_entries(entries)
    }

    /// Create the catalog from pairs of meme identifiers & image paths.
    pub fn from_entries<I, S, P>(entries: I) -> Result<Self, CatalogError>
        where I: IntoIterator<Item=(S, P)>, S: AsRef<str>, P: Into<PathBuf>
    {
        lazy_static! {
            static ref IDENTIFIER: Regex = Regex::new(r"^\w+$").unwrap();
        }

        let mut catalog = Catalog::default();
        for (identifier, image_path) in entries {
            let identifier = identifier.as_ref().to_lowercase();
            if catalog.index.contains_key(&identifier) {
                return Err(CatalogError::DuplicateIdentifier(identifier));
            }
            if !IDENTIFIER.is_match(&identifier) {
                warn!("Meme `{}` can never be requested since its name isn't a single word",
                    identifier);
            }

            let image_path = image_path.into();
            trace!("Meme `{}` => {}", identifier, image_path.display());
            catalog.index.insert(identifier.clone(), catalog.entries.len());
            catalog.entries.push(CatalogEntry{identifier, image_path});
        }

        debug!("{} meme(s) in the catalog", catalog.len());
        Ok(catalog)
    }
}

// Queries.
impl Catalog {
    /// Find the base image of a meme by its identifier (case-insensitive).
    pub fn lookup(&self, identifier: &str) -> Option<&Path> {
        self.index.get(&identifier.to_lowercase())
            .map(|&i| self.entries[i].image_path())
    }

    /// Identifiers of memes that contain given query (case-insensitive),
    /// in catalog order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.entries.iter()
            .map(CatalogEntry::identifier)
            .filter(|id| id.contains(&query))
            .collect()
    }

    /// Identifiers of all memes, in catalog order.
    pub fn list_all(&self) -> Vec<&str> {
        self.entries.iter().map(CatalogEntry::identifier).collect()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item=&CatalogEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


/// Error while loading the meme catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("cannot read meme catalog: {0}")]
    Io(#[from] io::Error),
    /// Catalog isn't valid JSON.
    #[error("malformed meme catalog: {0}")]
    Json(#[from] serde_json::Error),
    /// Catalog is valid JSON but not an object.
    #[error("meme catalog must be an object mapping meme names to file names")]
    NotAnObject,
    /// File name of a meme is not a string.
    #[error("file name of meme `{0}` is not a string")]
    InvalidFilename(String),
    /// Two memes have the same (case-insensitive) identifier.
    #[error("meme `{0}` is listed more than once")]
    DuplicateIdentifier(String),
}
