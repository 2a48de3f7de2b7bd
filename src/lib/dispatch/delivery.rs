//! Module defining the interface to the transport that delivers replies.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use log::trace;


/// Identity of whoever sent the command and will receive the reply.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Requester(String);

impl Requester {
    #[inline]
    pub fn new<S: Into<String>>(id: S) -> Self {
        Requester(id.into())
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<'s> From<&'s str> for Requester {
    fn from(id: &'s str) -> Self {
        Requester::new(id)
    }
}

impl fmt::Display for Requester {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.0)
    }
}


/// Reply to a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message.
    Text(String),
    /// Image file to send as a photo.
    ///
    /// The file must be read (or copied) before the delivery is completed,
    /// since it may be deleted right afterwards.
    Photo(PathBuf),
}


/// Sending half of a delivery: the transport uses it to report the outcome.
///
/// Dropping it without calling any of the methods counts as a failure.
#[derive(Debug)]
#[must_use = "delivery must be completed"]
pub struct Completion(oneshot::Sender<bool>);

impl Completion {
    /// Report whether the reply has been delivered.
    pub fn complete(self, success: bool) {
        trace!("Delivery completed: success={}", success);
        // Receiver being gone only means nobody's waiting for the outcome.
        let _ = self.0.send(success);
    }

    #[inline]
    pub fn succeed(self) {
        self.complete(true)
    }

    #[inline]
    pub fn fail(self) {
        self.complete(false)
    }
}


/// Receiving half of a delivery: resolves to whether the reply got delivered.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Delivery(oneshot::Receiver<bool>);

impl Future for Delivery {
    type Output = bool;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<bool> {
        Pin::new(&mut self.0).poll(cx).map(|result| result.unwrap_or(false))
    }
}


/// Create a connected pair of delivery halves.
pub fn channel() -> (Completion, Delivery) {
    let (tx, rx) = oneshot::channel();
    (Completion(tx), Delivery(rx))
}


/// Transport that delivers replies to requesters.
///
/// The transport may finish the delivery asynchronously
/// and complete it from any thread.
pub trait Transport: Send + Sync {
    fn deliver(&self, requester: &Requester, reply: Reply, completion: Completion);
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn deliver(&self, requester: &Requester, reply: Reply, completion: Completion) {
        (**self).deliver(requester, reply, completion)
    }
}


#[cfg(test)]
mod tests {
    use std::thread;

    use futures::executor::block_on;

    use super::channel;

    #[test]
    fn success() {
        let (completion, delivery) = channel();
        completion.succeed();
        assert!(block_on(delivery));
    }

    #[test]
    fn failure() {
        let (completion, delivery) = channel();
        completion.fail();
        assert!(!block_on(delivery));
    }

    #[test]
    fn dropped_completion_is_failure() {
        let (completion, delivery) = channel();
        drop(completion);
        assert!(!block_on(delivery));
    }

    #[test]
    fn completion_from_another_thread() {
        let (completion, delivery) = channel();
        let handle = thread::spawn(move || completion.succeed());
        assert!(block_on(delivery));
        handle.join().unwrap();
    }
}
