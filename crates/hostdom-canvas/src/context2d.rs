//! Drawing Context
//!
//! Raw platform handles, the adapter seam and the context handed back to
//! callers of `getContext`.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::{Context2dOptions, ImageData, StubContext, TextMetrics};

/// Opaque platform drawing handle.
///
/// The DOM never looks inside; it only passes the handle to an adapter or
/// back to the caller. Clones refer to the same handle.
#[derive(Clone)]
pub struct RawContext(Rc<dyn Any>);

impl RawContext {
    pub fn new<T: Any>(handle: T) -> Self {
        Self(Rc::new(handle))
    }

    /// Borrow the handle as its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// True when both values wrap the same handle
    pub fn ptr_eq(&self, other: &RawContext) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RawContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawContext").field(&Rc::as_ptr(&self.0)).finish()
    }
}

/// Context attributes reported by `getContextAttributes`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttributes {
    pub stencil: bool,
}

/// Extension object returned by `getExtension`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextExtension {
    /// `WEBGL_lose_context`-like extension
    LoseContext,
}

impl ContextExtension {
    /// Lose the context. Only meaningful on real backends.
    pub fn lose_context(&self) {
        tracing::trace!("lose_context called on {:?}", self);
    }
}

/// The 2D drawing surface drawing code talks to
pub trait RenderingContext2d {
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);

    fn measure_text(&self, text: &str) -> TextMetrics;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn draw_image(&mut self, image: &ImageData, dx: f64, dy: f64);

    fn get_image_data(&self, sx: f64, sy: f64, sw: f64, sh: f64) -> ImageData;

    fn put_image_data(&mut self, image: &ImageData, dx: f64, dy: f64);

    fn create_image_data(&self, width: u32, height: u32) -> ImageData;

    fn get_context_attributes(&self) -> ContextAttributes;

    fn get_extension(&self, name: &str) -> Option<ContextExtension>;
}

/// Builds a 2D context on top of a raw platform handle.
///
/// Treated as an opaque constructor by the DOM.
pub trait ContextAdapter {
    fn create(&self, raw: RawContext, options: Context2dOptions) -> Box<dyn RenderingContext2d>;
}

/// Result of resolving `getContext`
pub enum DrawingContext {
    /// Raw handle wrapped by the 2D adapter
    Adapted(Box<dyn RenderingContext2d>),
    /// Raw handle returned untouched (non-2d request)
    Raw(RawContext),
    /// No backend available
    Stub(StubContext),
}

impl DrawingContext {
    pub fn is_stub(&self) -> bool {
        matches!(self, DrawingContext::Stub(_))
    }

    pub fn as_raw(&self) -> Option<&RawContext> {
        match self {
            DrawingContext::Raw(raw) => Some(raw),
            _ => None,
        }
    }

    /// Access the 2D drawing surface, if this context has one
    pub fn as_2d(&self) -> Option<&dyn RenderingContext2d> {
        match self {
            DrawingContext::Adapted(ctx) => Some(ctx.as_ref()),
            DrawingContext::Stub(stub) => Some(stub),
            DrawingContext::Raw(_) => None,
        }
    }

    pub fn as_2d_mut(&mut self) -> Option<&mut dyn RenderingContext2d> {
        match self {
            DrawingContext::Adapted(ctx) => Some(ctx.as_mut()),
            DrawingContext::Stub(stub) => Some(stub),
            DrawingContext::Raw(_) => None,
        }
    }
}

impl fmt::Debug for DrawingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingContext::Adapted(_) => f.write_str("DrawingContext::Adapted(..)"),
            DrawingContext::Raw(raw) => f.debug_tuple("DrawingContext::Raw").field(raw).finish(),
            DrawingContext::Stub(stub) => {
                f.debug_tuple("DrawingContext::Stub").field(stub).finish()
            }
        }
    }
}
