//! Module implementing the delivery of replies in the shell.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{error, info, trace, warn};
use memebot::{Completion, Reply, Requester, Transport};


/// Transport that prints text replies to standard output
/// and copies images into a directory.
///
/// Images are copied in a background thread, as a chat client would upload them.
#[derive(Debug)]
pub struct DirectoryTransport {
    directory: PathBuf,
    /// How many more image deliveries should fail.
    failing: AtomicUsize,
    /// Number of image deliveries attempted so far.
    counter: AtomicUsize,
}

impl DirectoryTransport {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        DirectoryTransport{
            directory: directory.as_ref().to_owned(),
            failing: AtomicUsize::new(0),
            counter: AtomicUsize::new(0),
        }
    }

    /// Make the first `count` image deliveries fail.
    #[inline]
    pub fn fail_first(self, count: usize) -> Self {
        DirectoryTransport{failing: AtomicUsize::new(count), ..self}
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Transport for DirectoryTransport {
    fn deliver(&self, requester: &Requester, reply: Reply, completion: Completion) {
        match reply {
            Reply::Text(text) => {
                let stdout = io::stdout();
                let result = writeln!(stdout.lock(), "{}", text);
                if let Err(ref e) = result {
                    error!("Failed to print reply to {}: {}", requester, e);
                }
                completion.complete(result.is_ok());
            }
            Reply::Photo(source) => {
                let number = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
                let fail = self.failing
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok();
                if fail {
                    warn!("Failing delivery #{} of {} on purpose", number, source.display());
                    completion.fail();
                    return;
                }

                let target = self.directory.join(target_name(requester, number, &source));
                trace!("Copying {} to {}", source.display(), target.display());
                thread::spawn(move || match fs::copy(&source, &target) {
                    Ok(_) => {
                        info!("Image delivered to {}", target.display());
                        completion.succeed();
                    }
                    Err(e) => {
                        error!("Failed to copy {} to {}: {}",
                            source.display(), target.display(), e);
                        completion.fail();
                    }
                });
            }
        }
    }
}

/// Name of the file that an image is delivered as.
fn target_name(requester: &Requester, number: usize, source: &Path) -> String {
    let requester: String = requester.id().chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let extension = source.extension().and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "png".into());
    format!("{}-{}.{}", requester, number, extension)
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use futures::executor::block_on;
    use memebot::{delivery_channel, Reply, Requester, Transport};
    use tempfile::TempDir;

    use super::{target_name, DirectoryTransport};

    fn deliver(transport: &DirectoryTransport, requester: &str, reply: Reply) -> bool {
        let (completion, delivery) = delivery_channel();
        transport.deliver(&Requester::new(requester), reply, completion);
        block_on(delivery)
    }

    #[test]
    fn copies_images() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("meme.PNG");
        fs::write(&source, b"not really a PNG").unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let transport = DirectoryTransport::new(&out);
        assert!(deliver(&transport, "alice", Reply::Photo(source.clone())));
        assert!(deliver(&transport, "alice", Reply::Photo(source)));
        assert_eq!(b"not really a PNG".to_vec(), fs::read(out.join("alice-1.png")).unwrap());
        assert!(out.join("alice-2.png").exists());
    }

    #[test]
    fn fails_first_deliveries() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("meme.png");
        fs::write(&source, b"").unwrap();

        let transport = DirectoryTransport::new(dir.path()).fail_first(1);
        assert!(!deliver(&transport, "bob", Reply::Photo(source.clone())));
        assert!(deliver(&transport, "bob", Reply::Photo(source)));
        assert!(!dir.path().join("bob-1.png").exists());
        assert!(dir.path().join("bob-2.png").exists());
    }

    #[test]
    fn missing_image_is_not_delivered() {
        let dir = TempDir::new().unwrap();
        let transport = DirectoryTransport::new(dir.path());
        assert!(!deliver(&transport, "carol", Reply::Photo(dir.path().join("gone.png"))));
    }

    #[test]
    fn text_is_delivered() {
        let dir = TempDir::new().unwrap();
        let transport = DirectoryTransport::new(dir.path());
        assert!(deliver(&transport, "dave", Reply::Text("Available memes:\n - sap".into())));
    }

    #[test]
    fn names_are_sanitized() {
        let requester = Requester::new("../evil user");
        assert_eq!("___evil_user-3.jpg", target_name(&requester, 3, Path::new("x/sap.JPG")));
        assert_eq!("shell-1.png", target_name(&Requester::new("shell"), 1, Path::new("x")));
    }
}
