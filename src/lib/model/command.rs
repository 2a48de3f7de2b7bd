//! Module defining the commands recognized in chat messages.

use std::fmt;


/// Command recognized in an incoming message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List all memes in the catalog.
    ListMemes,
    /// Reply with a random "argument invalid" image.
    ArgumentInvalid,
    /// Search the catalog for memes whose identifier contains the query.
    SearchMemes(String),
    /// Compose a meme.
    Meme(ParsedCommand),
}


/// Request to compose a meme, as parsed from a message.
///
/// The meme identifier is always lower-cased.
/// Captions are kept verbatim; upper-casing happens when they're rendered.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedCommand {
    /// Lower-cased identifier of the meme's base image.
    pub meme: String,
    /// Text at the top of the image, if given.
    pub top_text: Option<String>,
    /// Text at the bottom of the image, if given.
    pub bottom_text: Option<String>,
}

impl ParsedCommand {
    /// Create a request for given meme without any captions.
    #[inline]
    pub fn new<M: AsRef<str>>(meme: M) -> Self {
        ParsedCommand{
            meme: meme.as_ref().to_lowercase(),
            top_text: None,
            bottom_text: None,
        }
    }

    #[inline]
    pub fn with_top_text<S: Into<String>>(mut self, text: S) -> Self {
        self.top_text = Some(text.into()); self
    }

    #[inline]
    pub fn with_bottom_text<S: Into<String>>(mut self, text: S) -> Self {
        self.bottom_text = Some(text.into()); self
    }
}

impl ParsedCommand {
    /// Top caption, or an empty string if there is none.
    #[inline]
    pub fn top(&self) -> &str {
        self.top_text.as_deref().unwrap_or("")
    }

    /// Bottom caption, or an empty string if there is none.
    #[inline]
    pub fn bottom(&self) -> &str {
        self.bottom_text.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for ParsedCommand {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ParsedCommand");
        ds.field("meme", &self.meme);
        if let Some(ref text) = self.top_text {
            ds.field("top_text", text);
        }
        if let Some(ref text) = self.bottom_text {
            ds.field("bottom_text", text);
        }
        ds.finish()
    }
}
