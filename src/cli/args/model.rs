//! Data structures for command-line arguments.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// Prefix of the commands, if other than the default one.
    pub prefix: Option<String>,
    /// JSON file mapping meme names to their image files.
    pub catalog: PathBuf,
    /// Directory that image files from the catalog are relative to.
    /// If absent, it's the directory of the catalog file.
    pub templates: Option<PathBuf>,
    /// Font file to render captions with.
    pub font: PathBuf,
    /// Directory with the fallback "argument invalid" images.
    pub invalid: PathBuf,
    /// Number of threads rendering memes (0 means one per CPU).
    pub threads: usize,

    /// Directory where delivered images are copied to.
    pub output_dir: PathBuf,
    /// Identity of the user sending the commands.
    pub user: String,
    /// How many of the first image deliveries should fail.
    pub fail_deliveries: usize,

    /// Whether to only print the usage of bot commands.
    pub print_commands: bool,
    /// Commands to handle.
    ///
    /// If empty, they shall be read from standard input, one per line.
    pub commands: Vec<String>,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


/// Error that can occur while parsing of command line arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// General error when parsing the arguments.
    #[error("invalid arguments: {0}")]
    Parse(#[from] clap::Error),
    /// Value of a numeric flag isn't a number.
    #[error("invalid value of --{flag} `{value}`: {source}")]
    Number {
        flag: &'static str,
        value: String,
        source: ParseIntError,
    },
}
