//! Module handling the temporary files that composed memes are delivered from.

use std::io::{self, Write};
use std::path::Path;

use log::{trace, warn};
use tempfile::{Builder, TempPath};

use crate::caption::CaptionOutput;


const PREFIX: &str = "memebot-";
const SUFFIX: &str = ".png";


/// Freshly created file holding a composed meme.
#[derive(Debug)]
pub struct Artifact {
    path: TempPath,
}

impl Artifact {
    /// Write the captioning output to a new temporary file,
    /// either in given directory or the system's temporary one.
    pub fn create(output: &CaptionOutput, directory: Option<&Path>) -> io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix(PREFIX).suffix(SUFFIX);
        let mut file = match directory {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(output.bytes())?;
        file.flush()?;

        let path = file.into_temp_path();
        trace!("Composed meme written to {}", path.display());
        Ok(Artifact{path})
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file.
    pub fn remove(self) {
        let path = self.path.to_path_buf();
        match self.path.close() {
            Ok(()) => trace!("Removed {}", path.display()),
            Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
