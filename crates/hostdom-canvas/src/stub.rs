//! Stub 2D context
//!
//! Accepts the common drawing calls and answers with benign values when no
//! real canvas backend exists.

use crate::{ContextAttributes, ContextExtension, ImageData, RenderingContext2d, TextMetrics};

/// Width of one character in stub text measurements
const CHAR_WIDTH: f64 = 6.0;
/// Line height reported by stub text measurements
const LINE_HEIGHT: f64 = 24.0;

/// Placeholder context that performs no drawing
#[derive(Debug, Clone, Copy, Default)]
pub struct StubContext;

impl StubContext {
    pub fn new() -> Self {
        Self
    }
}

impl RenderingContext2d for StubContext {
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        tracing::trace!(text, x, y, ?max_width, "stub fill_text");
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        // Length counted in UTF-16 units, matching what scripts see as `text.length`
        let width = text.encode_utf16().count() as f64 * CHAR_WIDTH;
        tracing::trace!(text, width, "stub measure_text");
        TextMetrics {
            width,
            height: LINE_HEIGHT,
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        tracing::trace!(x, y, width, height, "stub fill_rect");
    }

    fn draw_image(&mut self, image: &ImageData, dx: f64, dy: f64) {
        tracing::trace!(width = image.width, height = image.height, dx, dy, "stub draw_image");
    }

    fn get_image_data(&self, sx: f64, sy: f64, sw: f64, sh: f64) -> ImageData {
        tracing::trace!(sx, sy, sw, sh, "stub get_image_data");
        ImageData::from_data(vec![255, 0, 0, 0], 1, 1)
    }

    fn put_image_data(&mut self, image: &ImageData, dx: f64, dy: f64) {
        tracing::trace!(width = image.width, height = image.height, dx, dy, "stub put_image_data");
    }

    fn create_image_data(&self, width: u32, height: u32) -> ImageData {
        tracing::trace!(width, height, "stub create_image_data");
        ImageData::from_data(Vec::new(), 0, 0)
    }

    fn get_context_attributes(&self) -> ContextAttributes {
        tracing::trace!("stub get_context_attributes");
        ContextAttributes { stencil: true }
    }

    fn get_extension(&self, name: &str) -> Option<ContextExtension> {
        tracing::trace!(name, "stub get_extension");
        Some(ContextExtension::LoseContext)
    }
}
