//! Module handling the resources used for meme composition.

mod catalog;
mod filesystem;
mod fonts;
mod pool;
mod templates;


pub use self::catalog::{Catalog, CatalogEntry, CatalogError};
pub use self::fonts::{Font, FontError, FILE_EXTENSIONS as FONT_FILE_EXTENSIONS};
pub use self::pool::{InvalidArgumentPool, PoolError};
pub use self::templates::{IMAGE_FORMAT_EXTENSIONS, Template, TemplateError};

#[cfg(test)]
pub(crate) use self::fonts::tests::font_path;
