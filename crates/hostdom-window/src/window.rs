//! Window
//!
//! Owns the live viewport shared with documents, window-level listeners and
//! the `navigator`/`location`/`performance`/`console` objects.

use std::rc::Rc;

use hostdom_dom::{
    DocumentConfig, DomEvent, EventListener, FixedViewport, NodeId, SubscriptionRegistry, Viewport,
    ViewportProvider,
};
use tracing::{debug, info};

use crate::{
    AnimationFrames, Console, FRAME_INTERVAL, Location, Navigator, Performance, WindowConfig,
};

/// `window.matchMedia` result. No media queries are evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQueryList {
    pub matches: bool,
    pub media: String,
}

/// Window
pub struct Window {
    viewport: Rc<FixedViewport>,
    navigator: Navigator,
    location: Location,
    performance: Performance,
    console: Console,
    events: SubscriptionRegistry,
    /// Events queued for the next `flush_deferred`
    deferred: Vec<(String, EventListener)>,
    frames: AnimationFrames,
}

impl Window {
    pub fn new(config: WindowConfig, viewport: Viewport) -> Self {
        Self {
            viewport: Rc::new(FixedViewport::new(viewport)),
            navigator: config.navigator,
            location: config.location,
            performance: Performance::new(),
            console: Console::new(),
            events: SubscriptionRegistry::new(),
            deferred: Vec::new(),
            frames: AnimationFrames::new(),
        }
    }

    /// Shared viewport handle; documents built from it see resizes
    pub fn viewport_provider(&self) -> Rc<dyn ViewportProvider> {
        self.viewport.clone()
    }

    /// Document configuration bound to this window's viewport
    pub fn document_config(&self) -> DocumentConfig {
        DocumentConfig {
            viewport: self.viewport_provider(),
            ..DocumentConfig::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    /// Host notification that the window dimensions changed
    pub fn on_dimensions_change(&mut self, viewport: Viewport) {
        info!(
            width = viewport.width,
            height = viewport.height,
            scale = viewport.scale,
            "Window dimensions changed"
        );
        self.viewport.set(viewport);
        self.events.emit(&DomEvent::new("resize", NodeId::NONE));
    }

    pub fn inner_width(&self) -> f64 {
        self.viewport().width
    }

    pub fn inner_height(&self) -> f64 {
        self.viewport().height
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.viewport().scale
    }

    /// 0 in portrait, 90 in landscape
    pub fn orientation(&self) -> u16 {
        self.viewport().orientation().degrees()
    }

    /// Register a window listener.
    ///
    /// The page is already loaded, so a `load` listener is also queued to
    /// fire once on the next `flush_deferred`.
    pub fn add_event_listener(&mut self, event_type: &str, listener: EventListener) {
        if event_type == "load" {
            self.deferred.push((event_type.to_string(), listener.clone()));
        }
        self.events.add_event_listener(event_type, listener);
    }

    pub fn remove_event_listener(&mut self, event_type: &str, listener: &EventListener) -> bool {
        let key = listener.key();
        self.deferred
            .retain(|(name, queued)| name != event_type || queued.key() != key);
        self.events.remove_event_listener(event_type, listener)
    }

    pub fn dispatch_event(&self, event: &DomEvent) -> bool {
        self.events.emit(event);
        true
    }

    /// Deliver queued events, returning how many listeners ran
    pub fn flush_deferred(&mut self) -> usize {
        let queued = std::mem::take(&mut self.deferred);
        debug!(count = queued.len(), "Flushing deferred window events");
        for (event_type, listener) in &queued {
            listener.call(&DomEvent::new(event_type.as_str(), NodeId::NONE));
        }
        queued.len()
    }

    /// `requestAnimationFrame`: run `callback` once on the next frame with
    /// the `performance.now()` timestamp
    pub fn request_animation_frame(&self, callback: impl FnOnce(f64) + 'static) -> u32 {
        self.frames.request(callback)
    }

    pub fn cancel_animation_frame(&self, handle: u32) -> bool {
        self.frames.cancel(handle)
    }

    /// Shared frame queue, for callbacks that schedule their next frame
    pub fn animation_frames(&self) -> AnimationFrames {
        self.frames.clone()
    }

    /// Run the current frame now
    pub fn run_animation_frames(&self) -> usize {
        let timestamp = self.performance.now();
        let ran = self.frames.run(timestamp);
        if ran > 0 {
            debug!(ran, timestamp, "Ran animation frame");
        }
        ran
    }

    /// Wait one frame interval on the smol timer, then run the frame
    pub async fn next_animation_frame(&self) -> usize {
        smol::Timer::after(FRAME_INTERVAL).await;
        self.run_animation_frames()
    }

    pub fn scroll_to(&self, _x: f64, _y: f64) {}

    pub fn scroll_by(&self, _x: f64, _y: f64) {}

    pub fn resize_to(&self, _width: f64, _height: f64) {}

    pub fn match_media(&self, media: &str) -> MediaQueryList {
        MediaQueryList {
            matches: false,
            media: media.to_string(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn performance(&self) -> &Performance {
        &self.performance
    }

    pub fn performance_mut(&mut self) -> &mut Performance {
        &mut self.performance
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.console
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WindowConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_dimensions() {
        let window = Window::new(WindowConfig::default(), Viewport::new(320.0, 640.0, 2.0));
        assert_eq!(window.inner_width(), 320.0);
        assert_eq!(window.inner_height(), 640.0);
        assert_eq!(window.device_pixel_ratio(), 2.0);
        assert_eq!(window.orientation(), 0);
    }

    #[test]
    fn test_resize_event() {
        let mut window = Window::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        window.add_event_listener(
            "resize",
            EventListener::new(move |e| sink.borrow_mut().push(e.event_type.clone())),
        );

        window.on_dimensions_change(Viewport::new(800.0, 600.0, 1.0));
        assert_eq!(*seen.borrow(), vec!["resize".to_string()]);
        assert_eq!(window.orientation(), 90);
        assert_eq!(window.inner_width(), 800.0);
    }

    #[test]
    fn test_load_listener_is_deferred() {
        let mut window = Window::default();
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        window.add_event_listener("load", EventListener::new(move |_| *sink.borrow_mut() += 1));

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(window.flush_deferred(), 1);
        assert_eq!(*calls.borrow(), 1);
        // Only once
        assert_eq!(window.flush_deferred(), 0);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_removed_load_listener_not_flushed() {
        let mut window = Window::default();
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let listener = EventListener::new(move |_| *sink.borrow_mut() += 1);
        window.add_event_listener("load", listener.clone());
        assert!(window.remove_event_listener("load", &listener));
        assert_eq!(window.flush_deferred(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_animation_frame_timestamps_follow_performance_clock() {
        let window = Window::default();
        let stamps = Rc::new(RefCell::new(Vec::new()));
        let sink = stamps.clone();
        window.request_animation_frame(move |ts| sink.borrow_mut().push(ts));
        let cancelled = window.request_animation_frame(|_| panic!("cancelled frame ran"));
        assert!(window.cancel_animation_frame(cancelled));

        let before = window.performance().now();
        assert_eq!(window.run_animation_frames(), 1);
        let after = window.performance().now();

        let ts = stamps.borrow()[0];
        assert!(ts >= before && ts <= after);
        assert_eq!(window.run_animation_frames(), 0);
    }

    #[test]
    fn test_next_animation_frame_waits_for_interval() {
        let window = Window::default();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        window.request_animation_frame(move |ts| sink.borrow_mut().push(ts));

        let ran = smol::block_on(window.next_animation_frame());
        assert_eq!(ran, 1);
        assert!(frames.borrow()[0] >= FRAME_INTERVAL.as_secs_f64() * 1000.0);
    }

    #[test]
    fn test_match_media() {
        let window = Window::default();
        let list = window.match_media("(min-width: 600px)");
        assert!(!list.matches);
        assert_eq!(list.media, "(min-width: 600px)");
    }
}
