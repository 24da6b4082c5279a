//! 2D context configuration
//!
//! Fixed defaults merged with caller overrides.

/// Configuration record handed to a [`ContextAdapter`](crate::ContextAdapter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context2dOptions {
    /// Maximum gradient stops supported by the adapter
    pub max_grad_stops: u32,
    /// Render through an offscreen buffer
    pub render_with_offscreen_buffer: bool,
    /// Use the fast (lower quality) fill tesselator
    pub fast_fill_tesselation: bool,
}

impl Default for Context2dOptions {
    fn default() -> Self {
        Self {
            max_grad_stops: 10,
            render_with_offscreen_buffer: false,
            fast_fill_tesselation: false,
        }
    }
}

impl Context2dOptions {
    /// Apply caller overrides on top of these options.
    ///
    /// Fields set in `overrides` win, everything else is kept.
    pub fn merged(self, overrides: &Context2dOverrides) -> Self {
        Self {
            max_grad_stops: overrides.max_grad_stops.unwrap_or(self.max_grad_stops),
            render_with_offscreen_buffer: overrides
                .render_with_offscreen_buffer
                .unwrap_or(self.render_with_offscreen_buffer),
            fast_fill_tesselation: overrides
                .fast_fill_tesselation
                .unwrap_or(self.fast_fill_tesselation),
        }
    }
}

/// Caller-supplied overrides for [`Context2dOptions`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context2dOverrides {
    pub max_grad_stops: Option<u32>,
    pub render_with_offscreen_buffer: Option<bool>,
    pub fast_fill_tesselation: Option<bool>,
}
