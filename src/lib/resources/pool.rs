//! Module implementing the pool of fallback "argument invalid" images.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use rand::{thread_rng, Rng};
use thiserror::Error;

use super::filesystem::list_files;
use super::templates::IMAGE_FORMAT_EXTENSIONS;


/// Images sent in place of a meme that couldn't be made,
/// or when someone asks for one directly.
///
/// The pool is enumerated once at startup and never changes afterwards.
/// It is never empty.
#[derive(Clone, Debug)]
pub struct InvalidArgumentPool {
    paths: Vec<PathBuf>,
}

impl InvalidArgumentPool {
    /// Enumerate image files in given directory.
    pub fn load<D: AsRef<Path>>(directory: D) -> Result<Self, PoolError> {
        let directory = directory.as_ref();
        debug!("Listing fallback images in {}", directory.display());
        let paths = list_files(directory, IMAGE_FORMAT_EXTENSIONS.keys())
            .map_err(|e| PoolError::Io(directory.to_owned(), e))?;
        if paths.is_empty() {
            return Err(PoolError::Empty(directory.to_owned()));
        }
        debug!("{} fallback image(s) found", paths.len());
        Ok(InvalidArgumentPool{paths})
    }

    /// Create the pool from given image paths.
    pub fn from_paths<I, P>(paths: I) -> Result<Self, PoolError>
        where I: IntoIterator<Item=P>, P: Into<PathBuf>
    {
        let paths: Vec<_> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(PoolError::Empty(PathBuf::new()));
        }
        Ok(InvalidArgumentPool{paths})
    }
}

impl InvalidArgumentPool {
    /// Pick one of the images uniformly at random.
    #[inline]
    pub fn choose(&self) -> &Path {
        self.choose_with(&mut thread_rng())
    }

    /// Pick one of the images uniformly at random, using given RNG.
    pub fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &Path {
        let index = rng.gen_range(0..self.paths.len());
        &self.paths[index]
    }

    #[inline]
    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.paths.iter().any(|p| p == path.as_ref())
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item=&Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}


/// Error while enumerating the fallback images.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Directory could not be listed.
    #[error("cannot list fallback images in {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),
    /// There are no images to fall back on.
    #[error("no fallback images found in {}", .0.display())]
    Empty(PathBuf),
}
