//! Module which defines the captioning engine.

use std::fmt;
use std::io;
use std::sync::Arc;

use futures::executor::ThreadPool;
use futures::future::{FutureExt, RemoteHandle};
use log::trace;

use crate::model::ImageMacro;
use crate::resources::Font;
use super::error::CaptionError;
use super::output::CaptionOutput;
use super::task::CaptionTask;


/// Image captioning engine.
///
/// Captioning is CPU-bound, so the engine runs it on its own pool of threads.
/// Nothing is cached between tasks: every one of them loads its template anew.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

/// Shared state of the engine.
struct Inner {
    font: Arc<Font>,
    pool: ThreadPool,
}

impl Engine {
    /// Create an Engine that renders captions with given font
    /// on a pool of given number of threads (0 means one per CPU).
    pub fn new(font: Font, threads: usize) -> io::Result<Self> {
        let mut builder = ThreadPool::builder();
        builder.name_prefix("caption-")
            .after_start(|i| trace!("Caption thread #{} started", i))
            .before_stop(|i| trace!("Caption thread #{} stopping", i));
        if threads > 0 {
            builder.pool_size(threads);
        }
        let pool = builder.create()?;
        Ok(Engine{inner: Arc::new(Inner{font: Arc::new(font), pool})})
    }
}

impl Engine {
    /// Render a given image macro by captioning the template with its text(s),
    /// in the current thread.
    #[inline]
    pub fn caption(&self, image_macro: ImageMacro) -> Result<CaptionOutput, CaptionError> {
        CaptionTask::new(image_macro, self.inner.font.clone()).perform()
    }

    /// Render a given image macro on the engine's thread pool.
    ///
    /// Dropping the returned future before a thread picks up the task cancels it.
    pub fn render(&self, image_macro: ImageMacro)
        -> RemoteHandle<Result<CaptionOutput, CaptionError>>
    {
        let task = CaptionTask::new(image_macro, self.inner.font.clone());
        let (future, handle) = async move { task.perform() }.remote_handle();
        self.inner.pool.spawn_ok(future);
        handle
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.inner.font
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Engine")
            .field("font", &self.inner.font)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use image::{self, Rgba, RgbaImage};
    use tempfile::TempDir;

    use crate::model::ImageMacro;
    use crate::resources::{Font, font_path};
    use super::super::CaptionError;
    use super::Engine;

    fn engine() -> Engine {
        Engine::new(Font::open(font_path()).unwrap(), 2).unwrap()
    }

    #[test]
    fn thread_safe() {
        fn assert_sync<T: Sync>() {}
        fn assert_send<T: Send>() {}

        assert_sync::<Engine>();
        assert_send::<Engine>();
    }

    #[test]
    fn render_on_pool() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aliens.png");
        RgbaImage::from_pixel(500, 500, Rgba([0x30, 0x60, 0x90, 0xff])).save(&path).unwrap();

        let output = block_on(engine().render(ImageMacro::new(&path, "hello", "world"))).unwrap();
        assert_eq!((500, 500), output.dimensions());
        assert_eq!(mime::IMAGE_PNG, output.mime_type());

        let decoded = image::load_from_memory(output.bytes()).unwrap();
        assert_eq!(500, decoded.width());
        assert_eq!(500, decoded.height());
    }

    #[test]
    fn same_input_same_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sap.png");
        RgbaImage::from_pixel(320, 120, Rgba([0xff, 0, 0, 0xff])).save(&path).unwrap();

        let engine = engine();
        let im = ImageMacro::new(&path, "Top", "Bottom");
        let first = engine.caption(im.clone()).unwrap();
        let second = block_on(engine.render(im)).unwrap();
        assert_eq!(first.bytes(), second.bytes());
    }

    #[test]
    fn missing_template() {
        let result = engine().caption(ImageMacro::new("/nonexistent/aliens.png", "", "X"));
        assert!(matches!(result, Err(CaptionError::Template(_))));
    }

    #[test]
    fn degenerate_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thin.png");
        RgbaImage::new(15, 400).save(&path).unwrap();

        let result = engine().caption(ImageMacro::new(&path, "", "X"));
        assert!(matches!(result, Err(CaptionError::Layout(_))));
    }
}
