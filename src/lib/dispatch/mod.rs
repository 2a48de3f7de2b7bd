//! Module implementing the handling of incoming commands:
//! from parsing them all the way to delivering the reply,
//! falling back to an "argument invalid" image whenever a meme can't be sent.

mod artifact;
mod builder;
mod config;
mod delivery;



use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, error, info, trace, warn};
use thiserror::Error;

use crate::caption::CaptionError;
use crate::model::{Command, ImageMacro, ParsedCommand};
pub use self::artifact::Artifact;
pub use self::builder::{Builder, BuildError};
pub use self::config::Config;
pub use self::delivery::{channel as delivery_channel,
                         Completion, Delivery, Reply, Requester, Transport};


/// Handles commands sent to the bot and replies to them through a `Transport`.
///
/// Requests are independent of each other; the only state they share
/// is the immutable `Config`. Many of them can be handled concurrently.
pub struct Dispatcher<T> {
    config: Arc<Config>,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    #[inline]
    pub fn new(config: Config, transport: T) -> Self {
        Self::with_shared_config(Arc::new(config), transport)
    }

    #[inline]
    pub fn with_shared_config(config: Arc<Config>, transport: T) -> Self {
        Dispatcher{config, transport}
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Handle a message sent by the requester.
    ///
    /// Returns `None` if the message isn't a meme command, in which case nothing is sent.
    /// Failures to make or deliver a meme are recovered from by sending a fallback image;
    /// an error means that even that (or a text reply) could not be delivered.
    pub async fn handle(&self, requester: &Requester,
                        text: &str) -> Result<Option<Outcome>, DeliveryError> {
        let command = match self.config.parser.parse(text) {
            Some(command) => command,
            None => {
                trace!("Not a meme command: {:?}", text);
                return Ok(None);
            }
        };
        debug!("Command from {}: {:?}", requester, command);

        let outcome = match command {
            Command::ListMemes => self.list_memes(requester).await?,
            Command::SearchMemes(query) => self.search_memes(requester, &query).await?,
            Command::ArgumentInvalid => self.fallback(requester, FallbackReason::Requested).await?,
            Command::Meme(parsed) => self.make_meme(requester, parsed).await?,
        };
        info!("Handled command from {}: {}", requester, outcome);
        Ok(Some(outcome))
    }

    async fn list_memes(&self, requester: &Requester) -> Result<Outcome, DeliveryError> {
        let memes = self.config.catalog.list_all();
        self.send_text(requester, format_list(&memes)).await?;
        Ok(Outcome::Listed(memes.len()))
    }

    async fn search_memes(&self, requester: &Requester,
                          query: &str) -> Result<Outcome, DeliveryError> {
        let memes = self.config.catalog.search(query);
        self.send_text(requester, format_search(query, &memes)).await?;
        Ok(Outcome::Searched(memes.into_iter().map(str::to_owned).collect()))
    }

    async fn make_meme(&self, requester: &Requester,
                       parsed: ParsedCommand) -> Result<Outcome, DeliveryError> {
        let template = match self.config.catalog.lookup(&parsed.meme) {
            Some(path) => path.to_owned(),
            None => {
                let reason = FallbackReason::UnknownMeme(parsed.meme);
                return self.fallback(requester, reason).await;
            }
        };

        let image_macro = ImageMacro::new(template, parsed.top(), parsed.bottom());
        let output = match self.config.engine.render(image_macro).await {
            Ok(output) => output,
            Err(e) => return self.fallback(requester, FallbackReason::Caption(e)).await,
        };
        let artifact = match Artifact::create(&output, self.config.artifact_directory()) {
            Ok(artifact) => artifact,
            Err(e) => return self.fallback(requester, FallbackReason::Artifact(e)).await,
        };

        let delivered = self.deliver(requester, Reply::Photo(artifact.path().to_owned())).await;
        artifact.remove();
        if delivered {
            Ok(Outcome::Captioned(parsed.meme))
        } else {
            self.fallback(requester, FallbackReason::DeliveryFailed).await
        }
    }

    /// Send a random "argument invalid" image.
    /// There is no recovery if this fails.
    async fn fallback(&self, requester: &Requester,
                      reason: FallbackReason) -> Result<Outcome, DeliveryError> {
        if reason.is_failure() {
            warn!("Sending fallback image to {}: {}", requester, reason);
        }
        let path = self.config.pool.choose().to_owned();
        debug!("Fallback image chosen: {}", path.display());

        if self.deliver(requester, Reply::Photo(path.clone())).await {
            Ok(Outcome::FellBack(reason))
        } else {
            error!("Fallback image {} could not be delivered to {}", path.display(), requester);
            Err(DeliveryError::Fallback{requester: requester.clone(), path, reason})
        }
    }

    async fn send_text(&self, requester: &Requester, text: String) -> Result<(), DeliveryError> {
        if self.deliver(requester, Reply::Text(text)).await {
            Ok(())
        } else {
            error!("Text reply could not be delivered to {}", requester);
            Err(DeliveryError::Text{requester: requester.clone()})
        }
    }

    async fn deliver(&self, requester: &Requester, reply: Reply) -> bool {
        trace!("Delivering {:?} to {}", reply, requester);
        let (completion, delivery) = delivery::channel();
        self.transport.deliver(requester, reply, completion);
        delivery.await
    }
}

impl<T: fmt::Debug> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish()
    }
}


fn format_list(memes: &[&str]) -> String {
    if memes.is_empty() {
        return "No memes available".into();
    }
    format!("Available memes:\n - {}", memes.iter().join("\n - "))
}

fn format_search(query: &str, memes: &[&str]) -> String {
    if memes.is_empty() {
        return format!("No memes matching `{}`", query);
    }
    format!("Memes matching `{}`:\n - {}", query, memes.iter().join("\n - "))
}


/// What was sent in reply to a command.
#[derive(Debug)]
pub enum Outcome {
    /// List of all memes, of given length.
    Listed(usize),
    /// Memes that matched the search query.
    Searched(Vec<String>),
    /// Meme with given identifier, with captions.
    Captioned(String),
    /// A fallback image.
    FellBack(FallbackReason),
}

impl fmt::Display for Outcome {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Listed(count) => write!(fmt, "listed {} meme(s)", count),
            Outcome::Searched(ref memes) => write!(fmt, "found {} meme(s)", memes.len()),
            Outcome::Captioned(ref meme) => write!(fmt, "sent meme `{}`", meme),
            Outcome::FellBack(ref reason) => write!(fmt, "sent fallback image ({})", reason),
        }
    }
}


/// Why a fallback image was sent.
#[derive(Debug)]
pub enum FallbackReason {
    /// It was asked for directly.
    Requested,
    /// There is no meme with given identifier.
    UnknownMeme(String),
    /// Meme could not be composed.
    Caption(CaptionError),
    /// Composed meme could not be saved for delivery.
    Artifact(io::Error),
    /// Composed meme was not delivered.
    DeliveryFailed,
}

impl FallbackReason {
    /// Whether the fallback recovers from a failure
    /// (rather than just being requested).
    #[inline]
    pub fn is_failure(&self) -> bool {
        !matches!(*self, FallbackReason::Requested)
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FallbackReason::Requested => write!(fmt, "requested"),
            FallbackReason::UnknownMeme(ref meme) => write!(fmt, "unknown meme `{}`", meme),
            FallbackReason::Caption(ref e) => write!(fmt, "captioning failed: {}", e),
            FallbackReason::Artifact(ref e) => write!(fmt, "cannot save composed meme: {}", e),
            FallbackReason::DeliveryFailed => write!(fmt, "composed meme was not delivered"),
        }
    }
}


/// Error when a reply could not be delivered and there was nothing to fall back on.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Text reply was not delivered.
    #[error("text reply to {requester} was not delivered")]
    Text { requester: Requester },
    /// Fallback image was not delivered.
    #[error("fallback image {} was not delivered to {requester} ({reason})", .path.display())]
    Fallback {
        requester: Requester,
        path: PathBuf,
        reason: FallbackReason,
    },
}
