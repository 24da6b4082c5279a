//! Drawing-context resolution for `getContext`

use std::fmt;
use std::rc::Rc;

use hostdom_canvas::{
    CONTEXT_2D, Context2dOptions, Context2dOverrides, ContextAdapter, DrawingContext, RawContext,
    StubContext,
};

/// Drawing capabilities injected into a Document
///
/// `ambient` replaces a process-wide "current context": it is only used when
/// the caller does not pass a context explicitly.
#[derive(Clone, Default)]
pub struct ContextHost {
    pub ambient: Option<RawContext>,
    pub adapter: Option<Rc<dyn ContextAdapter>>,
    /// Defaults merged under caller overrides
    pub defaults: Context2dOptions,
}

impl ContextHost {
    pub fn new(ambient: Option<RawContext>, adapter: Option<Rc<dyn ContextAdapter>>) -> Self {
        Self {
            ambient,
            adapter,
            defaults: Context2dOptions::default(),
        }
    }

    /// Resolve a context: explicit handle, then ambient handle, then the stub
    pub fn resolve(
        &self,
        context_type: &str,
        overrides: Option<&Context2dOverrides>,
        explicit: Option<RawContext>,
    ) -> DrawingContext {
        let Some(raw) = explicit.or_else(|| self.ambient.clone()) else {
            tracing::debug!(context_type, "No drawing context available, returning stub");
            return DrawingContext::Stub(StubContext::new());
        };

        if context_type != CONTEXT_2D {
            tracing::debug!(context_type, "Returning raw context");
            return DrawingContext::Raw(raw);
        }

        match &self.adapter {
            Some(adapter) => {
                let options = match overrides {
                    Some(overrides) => self.defaults.merged(overrides),
                    None => self.defaults,
                };
                tracing::debug!(?options, "Creating 2d context through adapter");
                DrawingContext::Adapted(adapter.create(raw, options))
            }
            None => {
                tracing::warn!(
                    "2d context requested but no adapter is installed, returning raw context"
                );
                DrawingContext::Raw(raw)
            }
        }
    }
}

impl fmt::Debug for ContextHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHost")
            .field("ambient", &self.ambient)
            .field("adapter", &self.adapter.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use hostdom_canvas::{
        ContextAttributes, ContextExtension, ImageData, RenderingContext2d, TextMetrics,
    };

    /// Adapter that records the options it was built with
    struct RecordingAdapter {
        seen: RefCell<Vec<Context2dOptions>>,
    }

    struct FakeContext(Context2dOptions);

    impl RenderingContext2d for FakeContext {
        fn fill_text(&mut self, _: &str, _: f64, _: f64, _: Option<f64>) {}
        fn measure_text(&self, _: &str) -> TextMetrics {
            TextMetrics { width: self.0.max_grad_stops as f64, height: 1.0 }
        }
        fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64) {}
        fn draw_image(&mut self, _: &ImageData, _: f64, _: f64) {}
        fn get_image_data(&self, _: f64, _: f64, _: f64, _: f64) -> ImageData {
            ImageData::new(0, 0)
        }
        fn put_image_data(&mut self, _: &ImageData, _: f64, _: f64) {}
        fn create_image_data(&self, w: u32, h: u32) -> ImageData {
            ImageData::new(w, h)
        }
        fn get_context_attributes(&self) -> ContextAttributes {
            ContextAttributes { stencil: false }
        }
        fn get_extension(&self, _: &str) -> Option<ContextExtension> {
            None
        }
    }

    impl ContextAdapter for RecordingAdapter {
        fn create(
            &self,
            _raw: RawContext,
            options: Context2dOptions,
        ) -> Box<dyn RenderingContext2d> {
            self.seen.borrow_mut().push(options);
            Box::new(FakeContext(options))
        }
    }

    fn recording() -> Rc<RecordingAdapter> {
        Rc::new(RecordingAdapter { seen: RefCell::new(Vec::new()) })
    }

    #[test]
    fn test_no_context_gives_stub() {
        let host = ContextHost::default();
        assert!(host.resolve("2d", None, None).is_stub());
        assert!(host.resolve("webgl", None, None).is_stub());
    }

    #[test]
    fn test_non_2d_returns_raw_unmodified() {
        let adapter = recording();
        let raw = RawContext::new("gl");
        let host = ContextHost::new(None, Some(adapter.clone()));

        let ctx = host.resolve("webgl", None, Some(raw.clone()));
        assert!(ctx.as_raw().is_some_and(|r| r.ptr_eq(&raw)));
        assert!(adapter.seen.borrow().is_empty());
    }

    #[test]
    fn test_explicit_beats_ambient() {
        let ambient = RawContext::new("ambient");
        let explicit = RawContext::new("explicit");
        let host = ContextHost::new(Some(ambient.clone()), None);

        let ctx = host.resolve("webgl", None, Some(explicit.clone()));
        assert!(ctx.as_raw().is_some_and(|r| r.ptr_eq(&explicit)));

        let ctx = host.resolve("webgl", None, None);
        assert!(ctx.as_raw().is_some_and(|r| r.ptr_eq(&ambient)));
    }

    #[test]
    fn test_2d_wraps_with_merged_options() {
        let adapter = recording();
        let host = ContextHost::new(Some(RawContext::new(())), Some(adapter.clone()));
        let overrides = Context2dOverrides {
            render_with_offscreen_buffer: Some(true),
            ..Default::default()
        };

        let ctx = host.resolve("2d", Some(&overrides), None);
        assert!(matches!(ctx, DrawingContext::Adapted(_)));

        let seen = adapter.seen.borrow();
        assert_eq!(
            seen[0],
            Context2dOptions {
                max_grad_stops: 10,
                render_with_offscreen_buffer: true,
                fast_fill_tesselation: false,
            }
        );
    }

    #[test]
    fn test_2d_without_adapter_returns_raw() {
        let raw = RawContext::new(());
        let host = ContextHost::new(Some(raw.clone()), None);
        let ctx = host.resolve("2d", None, None);
        assert!(ctx.as_raw().is_some_and(|r| r.ptr_eq(&raw)));
    }
}
