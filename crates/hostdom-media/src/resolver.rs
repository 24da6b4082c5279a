//! Image dimension resolvers

use std::future::Future;
use std::path::Path;

use crate::{ImageSource, LoadError};

/// Resolves the pixel dimensions of an image source
pub trait ImageSizeResolver {
    fn dimensions(
        &self,
        source: &ImageSource,
    ) -> impl Future<Output = Result<(u32, u32), LoadError>>;
}

/// Reads dimensions from local files with the `image` crate.
///
/// Decoding happens on smol's blocking pool. Remote sources are rejected;
/// hosts that can fetch them provide their own resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalImageResolver;

impl ImageSizeResolver for LocalImageResolver {
    async fn dimensions(&self, source: &ImageSource) -> Result<(u32, u32), LoadError> {
        match source {
            ImageSource::Local(path) => {
                let path = path.clone();
                smol::unblock(move || probe(&path)).await
            }
            ImageSource::Remote(url) => Err(LoadError::RemoteUnsupported(url.to_string())),
            ImageSource::DataUri(_) => Err(LoadError::Probe(
                "data URI was not written to a file".into(),
            )),
        }
    }
}

fn probe(path: &Path) -> Result<(u32, u32), LoadError> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    reader
        .into_dimensions()
        .map_err(|e| LoadError::Probe(e.to_string()))
}
