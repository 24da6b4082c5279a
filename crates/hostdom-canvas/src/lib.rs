//! hostdom Canvas
//!
//! Drawing-context contract used by `Element::get_context`.
//!
//! The host platform supplies a raw drawing handle and, optionally, an
//! adapter that turns that handle into a 2D context. When neither exists the
//! DOM hands out a [`StubContext`] so drawing code keeps running.

mod context2d;
mod image_data;
mod options;
mod stub;
mod text;

pub use context2d::{
    ContextAdapter, ContextAttributes, ContextExtension, DrawingContext, RawContext,
    RenderingContext2d,
};
pub use image_data::ImageData;
pub use options::{Context2dOptions, Context2dOverrides};
pub use stub::StubContext;
pub use text::TextMetrics;

/// The only context type that gets wrapped by an adapter.
pub const CONTEXT_2D: &str = "2d";
