//! hostdom Media
//!
//! Resolves image sources for `<img>` elements off the tree:
//! - base64 data URIs are decoded and written to a local file
//! - local files are probed for their dimensions
//! - remote URLs go through a pluggable [`ImageSizeResolver`]
//!
//! Loads run as single-shot tasks on a `smol::LocalExecutor` and report back
//! through `Document::finish_image_load`. Failures never cross the async
//! boundary as errors; they become `error` events on the element.

mod loader;
mod resolver;
mod source;
mod store;

pub use loader::{ImageLoader, load_image_src, spawn_image_load};
pub use resolver::{ImageSizeResolver, LocalImageResolver};
pub use source::{DataUri, ImageSource, classify_source};
pub use store::{FileStore, FsFileStore, MemoryFileStore};

/// Image load error
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid data URI")]
    InvalidDataUri,

    #[error("Unknown Base64 MIME type: {0}")]
    UnknownEncoding(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read image dimensions: {0}")]
    Probe(String),

    #[error("Remote image sources are not supported: {0}")]
    RemoteUnsupported(String),
}
