//! Viewport
//!
//! Host viewport dimensions read by element geometry accessors.

use std::cell::Cell;

/// Current host viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixel density
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self { width, height, scale }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width < self.height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orientation in degrees (`window.orientation` style)
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Portrait => 0,
            Orientation::Landscape => 90,
        }
    }
}

/// Source of viewport dimensions
pub trait ViewportProvider {
    fn viewport(&self) -> Viewport;
}

/// Viewport that only changes when told to
#[derive(Debug, Default)]
pub struct FixedViewport(Cell<Viewport>);

impl FixedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self(Cell::new(viewport))
    }

    pub fn set(&self, viewport: Viewport) {
        self.0.set(viewport);
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.0.get()
    }
}

/// Bounding rectangle returned by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomRect {
    pub x: f64,
    pub y: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl DomRect {
    /// Rectangle covering the whole viewport, origin at (0, 0)
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            left: 0.0,
            top: 0.0,
            right: viewport.width,
            bottom: viewport.height,
            width: viewport.width,
            height: viewport.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Viewport::new(390.0, 844.0, 3.0).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(844.0, 390.0, 3.0).orientation().degrees(), 90);
        // Square counts as landscape
        assert_eq!(Viewport::new(500.0, 500.0, 1.0).orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_fixed_viewport_updates() {
        let provider = FixedViewport::default();
        assert_eq!(provider.viewport(), Viewport::default());
        provider.set(Viewport::new(320.0, 480.0, 2.0));
        assert_eq!(provider.viewport().width, 320.0);
    }

    #[test]
    fn test_rect_from_viewport() {
        let rect = DomRect::from_viewport(&Viewport::new(320.0, 480.0, 2.0));
        assert_eq!((rect.x, rect.y, rect.left, rect.top), (0.0, 0.0, 0.0, 0.0));
        assert_eq!((rect.right, rect.bottom), (320.0, 480.0));
        assert_eq!((rect.width, rect.height), (320.0, 480.0));
    }
}
