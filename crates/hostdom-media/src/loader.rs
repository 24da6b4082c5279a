//! Image Loader
//!
//! Turns a `LoadRequest` into dimensions (and a local file for data URIs),
//! and drives that work as a task on a local executor.

use std::cell::RefCell;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use hostdom_dom::{Document, DomError, LoadRequest, NodeId, ResolvedImage};
use smol::{LocalExecutor, Task};

use crate::{FileStore, ImageSizeResolver, ImageSource, LoadError, classify_source};

/// Resolves image requests with a dimension resolver and a file store
#[derive(Debug)]
pub struct ImageLoader<R, S> {
    resolver: R,
    store: S,
    /// Directory decoded data URIs are written to
    directory: PathBuf,
}

impl<R: ImageSizeResolver, S: FileStore> ImageLoader<R, S> {
    pub fn new(resolver: R, store: S, directory: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            store,
            directory: directory.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a request to its final dimensions
    pub async fn resolve(&self, request: &LoadRequest) -> Result<ResolvedImage, LoadError> {
        match classify_source(&request.src)? {
            ImageSource::DataUri(data) => {
                let bytes = BASE64_STANDARD.decode(data.payload.as_bytes())?;
                let path = self.directory.join(file_name(&data.payload, data.extension));
                self.store.write(&path, bytes).await?;
                tracing::debug!("Wrote data URI for {} to {}", request.node, path.display());

                let (width, height) = match request.known_size {
                    Some(size) => size,
                    None => self.resolver.dimensions(&ImageSource::Local(path.clone())).await?,
                };
                Ok(ResolvedImage {
                    width,
                    height,
                    local_uri: Some(path.to_string_lossy().into_owned()),
                })
            }
            source => {
                let (width, height) = self.resolver.dimensions(&source).await?;
                Ok(ResolvedImage {
                    width,
                    height,
                    local_uri: None,
                })
            }
        }
    }
}

/// Content-addressed name for a decoded payload
fn file_name(payload: &str, extension: &str) -> String {
    let mut hasher = DefaultHasher::new();
    payload.hash(&mut hasher);
    format!("{:016x}-b64image.{}", hasher.finish(), extension)
}

/// Spawn a single-shot load for `request`.
///
/// The task resolves `true` if its outcome was applied to the document and
/// `false` if it was stale. Dropping the task cancels the load; no event
/// fires for a cancelled attempt. The document borrow is released before
/// listeners run, so `onload` may read the element back.
pub fn spawn_image_load<'a, R, S>(
    executor: &LocalExecutor<'a>,
    loader: Rc<ImageLoader<R, S>>,
    document: Rc<RefCell<Document>>,
    request: LoadRequest,
) -> Task<bool>
where
    R: ImageSizeResolver + 'a,
    S: FileStore + 'a,
{
    executor.spawn(async move {
        let outcome = loader.resolve(&request).await.map_err(|e| e.to_string());
        let staged = document.borrow_mut().stage_image_load(&request, outcome);
        match staged {
            Ok(Some(events)) => {
                events.dispatch();
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("Dropping image load for {}: {}", request.node, err);
                false
            }
        }
    })
}

/// Set an image's `src` and spawn its load if one is needed.
///
/// Events raised by the `src` change fire after the document borrow is
/// released.
pub fn load_image_src<'a, R, S>(
    executor: &LocalExecutor<'a>,
    loader: &Rc<ImageLoader<R, S>>,
    document: &Rc<RefCell<Document>>,
    image: NodeId,
    src: &str,
) -> Result<Option<Task<bool>>, DomError>
where
    R: ImageSizeResolver + 'a,
    S: FileStore + 'a,
{
    let (request, events) = document.borrow_mut().stage_image_src(image, src)?;
    events.dispatch();
    Ok(request.map(|request| {
        spawn_image_load(executor, Rc::clone(loader), Rc::clone(document), request)
    }))
}
