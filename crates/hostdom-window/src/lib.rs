//! hostdom Window
//!
//! Window-level surface around the DOM: live viewport dimensions fed by the
//! host's dimension-change notifications, window event listeners, navigator
//! and location values, animation frames, `performance` and `console` timers.

mod animation;
mod config;
mod console;
mod performance;
mod window;

pub use animation::{AnimationFrames, FRAME_INTERVAL, FrameCallback};
pub use config::{Location, Navigator, WindowConfig};
pub use console::Console;
pub use performance::{
    EntryType, Performance, PerformanceEntry, PerformanceNavigation, PerformanceTiming,
};
pub use window::{MediaQueryList, Window};

/// Performance API error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerformanceError {
    #[error("No mark named {0:?}")]
    UnknownMark(String),
}
