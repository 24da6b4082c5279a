//! Image Element
//!
//! `src`/`width`/`height`/`complete`/`onload` surface of the image element.
//! Resolving a source is asynchronous and lives outside the tree: setting a
//! source hands out a [`LoadRequest`], and the resolver reports back through
//! [`Document::finish_image_load`]. Each attempt fires at most one terminal
//! event (`load` or `error`).
//!
//! The `stage_*` variants apply the state change and return the events as
//! [`ImageEvents`] instead of firing them, so a caller holding the document
//! in a `RefCell` can release its borrow before listeners run.

use crate::document::Document;
use crate::events::{DomEvent, EventListener};
use crate::node::{ElementKind, ImageState};
use crate::{DomError, NodeId, Result};

/// Pending resolution of an image source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub node: NodeId,
    pub attempt: u64,
    pub src: String,
    /// Dimensions already set on the element, if both are known
    pub known_size: Option<(u32, u32)>,
}

impl LoadRequest {
    pub fn is_data_uri(&self) -> bool {
        self.src.starts_with("data:")
    }
}

/// Successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub width: u32,
    pub height: u32,
    /// Local file the source was written to, if any
    pub local_uri: Option<String>,
}

/// Outcome reported by the resolver; errors carry a message
pub type LoadOutcome = std::result::Result<ResolvedImage, String>;

/// Events produced by an image state change, not yet delivered.
///
/// Listeners are snapshotted when the events are staged.
#[derive(Debug, Default)]
#[must_use = "staged image events do nothing until dispatched"]
pub struct ImageEvents {
    deliveries: Vec<(DomEvent, Vec<EventListener>)>,
}

impl ImageEvents {
    fn push(&mut self, event: DomEvent, listeners: Vec<EventListener>) {
        self.deliveries.push((event, listeners));
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Names of the staged events, in delivery order
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.deliveries.iter().map(|(event, _)| event.event_type.as_str())
    }

    /// Deliver every staged event. Returns the number of listener calls.
    pub fn dispatch(self) -> usize {
        let mut called = 0;
        for (event, listeners) in &self.deliveries {
            for listener in listeners {
                listener.call(event);
            }
            called += listeners.len();
        }
        called
    }
}

impl Document {
    /// `new Image(width, height)`: a detached image element with a preset size
    pub fn new_image(&mut self, width: Option<u32>, height: Option<u32>) -> NodeId {
        self.tree_mut()
            .create_node("img", ElementKind::Image(ImageState::with_size(width, height)))
    }

    pub fn image_state(&self, id: NodeId) -> Result<&ImageState> {
        self.node_ref(id)?.as_image().ok_or(DomError::NotAnImage(id))
    }

    fn image_state_mut(&mut self, id: NodeId) -> Result<&mut ImageState> {
        self.node_ref_mut(id)?
            .as_image_mut()
            .ok_or(DomError::NotAnImage(id))
    }

    pub fn set_image_size(
        &mut self,
        id: NodeId,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<()> {
        let state = self.image_state_mut(id)?;
        state.width = width;
        state.height = height;
        Ok(())
    }

    /// Install (or clear) the `onload` callback, called after `load` listeners
    pub fn set_onload(&mut self, id: NodeId, listener: Option<EventListener>) -> Result<()> {
        self.image_state_mut(id)?.onload = listener;
        Ok(())
    }

    /// Set `src` and start loading it, firing any resulting events.
    ///
    /// Returns the request the asynchronous resolver must complete, or `None`
    /// when nothing is left to resolve (empty source, or size already known).
    pub fn set_image_src(
        &mut self,
        id: NodeId,
        src: impl Into<String>,
    ) -> Result<Option<LoadRequest>> {
        let (request, events) = self.stage_image_src(id, src)?;
        events.dispatch();
        Ok(request)
    }

    /// Same as [`set_image_src`](Self::set_image_src) but returns the events
    /// (`loading`, or `load` + `onload`) instead of firing them
    pub fn stage_image_src(
        &mut self,
        id: NodeId,
        src: impl Into<String>,
    ) -> Result<(Option<LoadRequest>, ImageEvents)> {
        let src = src.into();
        let mut events = ImageEvents::default();
        let state = self.image_state_mut(id)?;
        state.attempt += 1;
        state.settled = false;

        if src.is_empty() {
            state.src = None;
            state.settled = true;
            return Ok((None, events));
        }
        state.src = Some(src.clone());

        let is_data_uri = src.starts_with("data:");
        if !is_data_uri && state.has_size() {
            state.local_uri = Some(src);
            state.settled = true;
            self.stage_image_complete(id, &mut events)?;
            return Ok((None, events));
        }

        if is_data_uri {
            state.local_uri = None;
        } else {
            state.local_uri = Some(src.clone());
        }
        state.complete = false;
        let request = LoadRequest {
            node: id,
            attempt: state.attempt,
            src,
            known_size: match (state.width, state.height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
                _ => None,
            },
        };

        self.stage_event(id, DomEvent::new("loading", id), &mut events)?;
        tracing::debug!("Image {} loading attempt {}", id, request.attempt);
        Ok((Some(request), events))
    }

    /// Apply the resolver's outcome for `request` and fire its event.
    ///
    /// Returns `false` (and does nothing) when the request is stale: a newer
    /// source was set, or this attempt already settled.
    pub fn finish_image_load(
        &mut self,
        request: &LoadRequest,
        outcome: LoadOutcome,
    ) -> Result<bool> {
        match self.stage_image_load(request, outcome)? {
            Some(events) => {
                events.dispatch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Same as [`finish_image_load`](Self::finish_image_load) but returns the
    /// terminal event instead of firing it; `None` for a stale request
    pub fn stage_image_load(
        &mut self,
        request: &LoadRequest,
        outcome: LoadOutcome,
    ) -> Result<Option<ImageEvents>> {
        let id = request.node;
        let state = self.image_state_mut(id)?;
        if state.attempt != request.attempt || state.settled {
            tracing::debug!("Ignoring stale load attempt {} for {}", request.attempt, id);
            return Ok(None);
        }
        state.settled = true;

        let mut events = ImageEvents::default();
        match outcome {
            Ok(resolved) => {
                state.width = Some(resolved.width);
                state.height = Some(resolved.height);
                if resolved.local_uri.is_some() {
                    state.local_uri = resolved.local_uri;
                }
                self.stage_image_complete(id, &mut events)?;
            }
            Err(message) => {
                tracing::warn!("Image {} failed to load: {}", id, message);
                self.stage_event(id, DomEvent::error(id, message), &mut events)?;
            }
        }
        Ok(Some(events))
    }

    /// `complete = true`: stage `load`, then `onload`
    fn stage_image_complete(&mut self, id: NodeId, events: &mut ImageEvents) -> Result<()> {
        let state = self.image_state_mut(id)?;
        state.complete = true;
        let onload = state.onload.clone();

        let event = DomEvent::new("load", id);
        let mut listeners = self.node_ref(id)?.events.snapshot("load");
        listeners.extend(onload);
        events.push(event, listeners);
        Ok(())
    }

    fn stage_event(&self, id: NodeId, event: DomEvent, events: &mut ImageEvents) -> Result<()> {
        let listeners = self.node_ref(id)?.events.snapshot(&event.event_type);
        events.push(event, listeners);
        Ok(())
    }
}
