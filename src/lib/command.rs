//! Module implementing the recognizer of meme commands in chat messages.

use std::fmt;

use log::trace;
use regex::{self, Captures, Regex};

use crate::model::{Command, ParsedCommand};


/// Command prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "!";


/// Recognizes meme commands in free-form message text.
///
/// Patterns are tried in a fixed priority order and the first match wins.
/// Text that matches no pattern is not an error: the parser sees every
/// message the bot receives and most of them aren't meant for it.
pub struct CommandParser {
    prefix: String,
    patterns: Vec<Pattern>,
}

/// Entry of the dispatch table: a regex and how to turn its match into a `Command`.
struct Pattern {
    name: &'static str,
    regex: Regex,
    handler: fn(&Captures) -> Command,
}

impl Pattern {
    fn new(name: &'static str, regex: &str,
           handler: fn(&Captures) -> Command) -> Result<Self, regex::Error> {
        let regex = Regex::new(regex)?;
        Ok(Pattern{name, regex, handler})
    }
}

impl CommandParser {
    /// Create a parser for commands starting with given prefix.
    pub fn new<P: Into<String>>(prefix: P) -> Result<Self, regex::Error> {
        let prefix = prefix.into();
        let p = regex::escape(&prefix);

        // Caption text must be enclosed in double quotes.
        // Anything else after the meme identifier doesn't match at all.
        let patterns = vec![
            Pattern::new("memelist",
                &format!(r"^{}memelist$", p), list_memes)?,
            Pattern::new("argumentinvalid",
                &format!(r"^{}argumentinvalid$", p), argument_invalid)?,
            Pattern::new("memesearch",
                &format!(r"^{}memesearch (?P<query>.+)$", p), search_memes)?,
            Pattern::new("meme",
                &format!(r#"^{}meme (?P<meme>\w+) "(?P<top>.*)" "(?P<bottom>.*)"$"#, p),
                top_and_bottom_meme)?,
            Pattern::new("meme (bottom text)",
                &format!(r#"^{}meme (?P<meme>\w+) "(?P<bottom>.*)"$"#, p),
                bottom_meme)?,
        ];
        Ok(CommandParser{prefix, patterns})
    }
}

impl CommandParser {
    /// Parse the message text into a `Command`.
    /// Returns `None` if the text isn't a meme command.
    pub fn parse(&self, text: &str) -> Option<Command> {
        for pattern in &self.patterns {
            if let Some(captures) = pattern.regex.captures(text) {
                trace!("Message matches the `{}` pattern", pattern.name);
                return Some((pattern.handler)(&captures));
            }
        }
        None
    }

    /// The prefix that commands must start with.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Human-readable usage of every recognized command.
    pub fn usage(&self) -> Vec<String> {
        let p = &self.prefix;
        vec![
            format!("{}memelist : lists available memes", p),
            format!("{}memesearch (query) : lists memes whose names contain the query", p),
            format!("{}argumentinvalid : gets a random 'argument invalid' meme", p),
            format!("{}meme (memename) \"(top text)\" \"(bottom text)\" : makes beautiful meme. \
                     Quotes are mandatory", p),
        ]
    }
}

impl fmt::Debug for CommandParser {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("CommandParser")
            .field("prefix", &self.prefix)
            .field("patterns", &self.patterns.iter().map(|p| p.name).collect::<Vec<_>>())
            .finish()
    }
}


// Pattern handlers

fn list_memes(_: &Captures) -> Command {
    Command::ListMemes
}

fn argument_invalid(_: &Captures) -> Command {
    Command::ArgumentInvalid
}

fn search_memes(captures: &Captures) -> Command {
    Command::SearchMemes(captures["query"].to_owned())
}

fn top_and_bottom_meme(captures: &Captures) -> Command {
    Command::Meme(ParsedCommand::new(&captures["meme"])
        .with_top_text(&captures["top"])
        .with_bottom_text(&captures["bottom"]))
}

fn bottom_meme(captures: &Captures) -> Command {
    Command::Meme(ParsedCommand::new(&captures["meme"])
        .with_bottom_text(&captures["bottom"]))
}
