#![forbid(unsafe_code)]

//! The narrow capability the engine needs from the host's scrollable
//! surface: read the live scroll offset, write it back (collection swaps
//! reset it to 0), and read the measured viewport height.
//!
//! The surface is the authority on viewport height. A resize is reported
//! to the controller as a bare notification; the new height is read back
//! through this trait.

use std::cell::Cell;

/// Host-view capability: live scroll position and viewport size.
pub trait ScrollSurface {
    /// Current scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Imperatively move the surface to `offset_px`.
    fn set_scroll_offset(&self, offset_px: f64);

    /// Measured viewport height in pixels. 0 when unmeasured.
    fn viewport_height(&self) -> f64;
}

/// In-memory reference surface for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    offset: Cell<f64>,
    height: Cell<f64>,
}

impl MemorySurface {
    /// An unmeasured surface at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface at the origin with a measured viewport height.
    #[must_use]
    pub fn with_height(height_px: f64) -> Self {
        Self {
            offset: Cell::new(0.0),
            height: Cell::new(height_px),
        }
    }

    /// Host-side: record a new measured height. Follow with
    /// `ViewportController::on_resize` so the window is recomputed.
    pub fn set_viewport_height(&self, height_px: f64) {
        self.height.set(height_px);
    }
}

impl ScrollSurface for MemorySurface {
    fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    fn set_scroll_offset(&self, offset_px: f64) {
        self.offset.set(offset_px);
    }

    fn viewport_height(&self) -> f64 {
        self.height.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_unmeasured_at_origin() {
        let s = MemorySurface::new();
        assert_eq!(s.scroll_offset(), 0.0);
        assert_eq!(s.viewport_height(), 0.0);
    }

    #[test]
    fn with_height_sets_the_viewport() {
        let s = MemorySurface::with_height(640.0);
        assert_eq!(s.viewport_height(), 640.0);
    }

    #[test]
    fn offset_round_trips() {
        let s = MemorySurface::with_height(640.0);
        s.set_scroll_offset(3200.0);
        assert_eq!(s.scroll_offset(), 3200.0);
    }

    #[test]
    fn resize_updates_the_reported_height() {
        let s = MemorySurface::with_height(640.0);
        s.set_viewport_height(480.0);
        assert_eq!(s.viewport_height(), 480.0);
    }
}
