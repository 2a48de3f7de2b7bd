//! Module with helpers for enumerating resource directories.

use std::io;
use std::path::{Path, PathBuf};

use glob::{self, Pattern};
use log::{trace, warn};


/// List files in given directory that have one of the extensions given.
///
/// Extensions are compared case-insensitively.
/// The result is sorted, so that it doesn't depend on the order of directory entries.
pub fn list_files<D, I, S>(directory: D, extensions: I) -> io::Result<Vec<PathBuf>>
    where D: AsRef<Path>, I: IntoIterator<Item=S>, S: ToString
{
    let directory = directory.as_ref();
    if !directory.is_dir() {
        return Err(io::Error::new(io::ErrorKind::NotFound,
            format!("{} is not a directory", directory.display())));
    }

    let extensions: Vec<_> = extensions.into_iter()
        .map(|e| e.to_string()).map(|e| e.trim().to_lowercase())
        .collect();

    // We filter the extensions manually because the `glob` crate
    // doesn't support patterns like *.{gif|png} (i.e. with braces).
    let pattern = format!("{}",
        Path::new(&Pattern::escape(&directory.to_string_lossy())).join("*").display());
    trace!("Globbing with {}", pattern);
    let glob_iter = glob::glob(&pattern)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut files = vec![];
    for entry in glob_iter {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", directory.display(), e);
                continue;
            },
        };
        let matches = extension(&path)
            .map(|ext| extensions.iter().any(|e| *e == ext))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Get the (useful part of) file extension from the path.
pub fn extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().extension().and_then(|e| e.to_str())
        .map(|s| s.trim().to_lowercase())
}


#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use spectral::prelude::*;
    use tempfile::TempDir;

    use super::{extension, list_files};

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(Some("jpg".to_owned()), extension("foo/Bar.JPG"));
        assert_eq!(None, extension("foo/bar"));
    }

    #[test]
    fn lists_only_matching_files() {
        let dir = TempDir::new().unwrap();
        for name in &["b.png", "a.JPG", "c.txt", "d"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("e.png")).unwrap();

        let files = list_files(dir.path(), &["jpg", "png"]).unwrap();
        let names: Vec<_> = files.iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(vec!["a.JPG", "b.png"], names);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert_that!(list_files(dir.path().join("nope"), &["png"])).is_err();
    }
}
