//! Animation frames
//!
//! `requestAnimationFrame` callbacks wait in a queue and run together on the
//! next frame, each receiving the frame timestamp in milliseconds.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Delay between frames (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Callback run once on the next frame
pub type FrameCallback = Box<dyn FnOnce(f64)>;

#[derive(Default)]
struct FrameQueue {
    /// Last handle given out; handles start at 1
    last_handle: u32,
    /// Request counter, never wraps
    next_seq: u64,
    /// Pending callbacks in request order
    pending: Vec<PendingFrame>,
}

struct PendingFrame {
    seq: u64,
    handle: u32,
    callback: FrameCallback,
}

/// Shared frame queue.
///
/// Clones refer to the same queue, so a callback can capture a handle and
/// request the following frame from inside a frame.
#[derive(Clone, Default)]
pub struct AnimationFrames(Rc<RefCell<FrameQueue>>);

impl AnimationFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for the next frame, returning its handle
    pub fn request(&self, callback: impl FnOnce(f64) + 'static) -> u32 {
        let mut queue = self.0.borrow_mut();
        queue.last_handle = queue.last_handle.wrapping_add(1).max(1);
        let handle = queue.last_handle;
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(PendingFrame {
            seq,
            handle,
            callback: Box::new(callback),
        });
        handle
    }

    /// Drop a queued callback. Returns false if it already ran or never existed.
    pub fn cancel(&self, handle: u32) -> bool {
        let mut queue = self.0.borrow_mut();
        let before = queue.pending.len();
        queue.pending.retain(|frame| frame.handle != handle);
        queue.pending.len() != before
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Run one frame. Returns the number of callbacks called.
    ///
    /// Only callbacks queued before the frame started run; those requested
    /// during the frame wait for the next one. A callback cancelled by an
    /// earlier callback of the same frame does not run.
    pub fn run(&self, timestamp: f64) -> usize {
        let cutoff = self.0.borrow().next_seq;
        let mut ran = 0;
        loop {
            // Borrow released before the callback runs
            let frame = {
                let mut queue = self.0.borrow_mut();
                if !queue.pending.first().is_some_and(|f| f.seq < cutoff) {
                    break;
                }
                queue.pending.remove(0)
            };
            (frame.callback)(timestamp);
            ran += 1;
        }
        ran
    }
}

impl fmt::Debug for AnimationFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationFrames")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(
        log: &Rc<RefCell<Vec<(&'static str, f64)>>>,
        tag: &'static str,
    ) -> impl FnOnce(f64) + 'static {
        let log = Rc::clone(log);
        move |ts| log.borrow_mut().push((tag, ts))
    }

    #[test]
    fn test_callbacks_run_in_request_order() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = frames.request(recorder(&log, "a"));
        let b = frames.request(recorder(&log, "b"));
        assert!(a > 0);
        assert_ne!(a, b);

        assert_eq!(frames.run(16.0), 2);
        assert_eq!(*log.borrow(), vec![("a", 16.0), ("b", 16.0)]);
    }

    #[test]
    fn test_callbacks_are_one_shot() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        frames.request(recorder(&log, "a"));

        assert_eq!(frames.run(1.0), 1);
        assert_eq!(frames.run(2.0), 0);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_cancel_before_frame() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = frames.request(recorder(&log, "a"));
        frames.request(recorder(&log, "b"));

        assert!(frames.cancel(a));
        assert!(!frames.cancel(a));
        assert_eq!(frames.run(0.0), 1);
        assert_eq!(*log.borrow(), vec![("b", 0.0)]);
    }

    #[test]
    fn test_request_during_frame_waits_for_next_frame() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let handle = frames.clone();
            let next = recorder(&log, "second");
            let log = Rc::clone(&log);
            frames.request(move |ts| {
                log.borrow_mut().push(("first", ts));
                handle.request(next);
            });
        }

        assert_eq!(frames.run(1.0), 1);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.run(2.0), 1);
        assert_eq!(*log.borrow(), vec![("first", 1.0), ("second", 2.0)]);
    }

    #[test]
    fn test_cancel_from_earlier_callback_in_same_frame() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = frames.clone();
        // Handles are sequential, so the second request gets first + 1
        let first = frames.request(move |_| {
            handle.cancel(2);
        });
        assert_eq!(first, 1);
        assert_eq!(frames.request(recorder(&log, "cancelled")), 2);
        frames.request(recorder(&log, "kept"));

        assert_eq!(frames.run(5.0), 2);
        assert_eq!(*log.borrow(), vec![("kept", 5.0)]);
    }

    #[test]
    fn test_cancel_and_request_in_one_callback() {
        let frames = AnimationFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = frames.clone();
        let later = recorder(&log, "later");
        frames.request(move |_| {
            handle.cancel(2);
            handle.request(later);
        });
        frames.request(recorder(&log, "cancelled"));

        assert_eq!(frames.run(1.0), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(frames.run(2.0), 1);
        assert_eq!(*log.borrow(), vec![("later", 2.0)]);
    }
}
