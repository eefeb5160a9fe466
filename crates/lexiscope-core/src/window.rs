#![forbid(unsafe_code)]

//! Window computation: scroll offset in, materialization range out.
//!
//! # Design
//!
//! The backing list is conceptually a column of `total_count` rows, each
//! exactly `item_height` pixels tall. Only the rows under the viewport —
//! plus a symmetric padding band that hides rendering latency during fast
//! scrolling — are ever materialized. The window is described by a start
//! index, a row count, and one translate offset applied to the rendered
//! band's container (one transform, not N per-item positions).
//!
//! The computation is a pure function of its arguments. It holds no state,
//! performs no I/O, and is total: every `f64` input, including NaN and
//! infinities, produces a well-formed [`Window`].
//!
//! # Invariants
//!
//! 1. `start_index + visible_count <= total_count`.
//! 2. `translate_offset == start_index as f64 * item_height`.
//! 3. `visible_count <= ceil(viewport_height / item_height) + 2 * padding`.
//! 4. Increasing the scroll offset with other inputs fixed never decreases
//!    `start_index`.
//! 5. Identical inputs produce identical outputs.
//! 6. `total_count == 0` yields the origin window for any offset.
//!
//! # Usage
//!
//! ```
//! use lexiscope_core::WindowParams;
//!
//! let params = WindowParams::default(); // 32 px rows, 10 padding rows
//! let window = params.compute(3200.0, 640.0, 1000);
//! assert_eq!(window.start_index, 90);
//! assert_eq!(window.visible_count, 40);
//! assert_eq!(window.translate_offset, 2880.0);
//! ```

use std::ops::Range;

use crate::params::WindowParams;

/// The contiguous index range currently materialized for display, plus
/// the pixel offset that positions it inside the full list.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Window {
    /// First materialized index into the backing collection.
    pub start_index: usize,
    /// Number of materialized rows. Zero when the collection is empty or
    /// the scroll offset points past its end.
    pub visible_count: usize,
    /// Pixel offset of the rendered band's container, always
    /// `start_index * item_height`.
    pub translate_offset: f64,
}

impl Window {
    /// The empty window at the origin.
    pub const EMPTY: Window = Window {
        start_index: 0,
        visible_count: 0,
        translate_offset: 0.0,
    };

    /// Index range `[start_index, start_index + visible_count)`.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index()
    }

    /// One past the last materialized index.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.start_index.saturating_add(self.visible_count)
    }

    /// True when nothing is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    /// True when `index` falls inside the materialized range.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index()
    }
}

impl WindowParams {
    /// Compute the window for a scroll offset, viewport height, and
    /// backing-collection length.
    ///
    /// Steps:
    /// 1. `floor(scroll_offset / item_height)` locates the row under the
    ///    viewport's top edge; the padding band extends the window above
    ///    it, clamped at index 0.
    /// 2. `ceil(viewport_height / item_height) + 2 * padding` rows cover
    ///    the viewport plus the bands above and below.
    /// 3. Start and count are clamped against the collection: a start
    ///    past the end (stale offset over a shrunken collection) lands on
    ///    `total_count` with an empty window, and the count never reaches
    ///    past the last row.
    ///
    /// An empty collection short-circuits to [`Window::EMPTY`] regardless
    /// of the offset.
    #[must_use]
    pub fn compute(
        &self,
        scroll_offset_px: f64,
        viewport_height_px: f64,
        total_count: usize,
    ) -> Window {
        if total_count == 0 {
            return Window::EMPTY;
        }

        let h = self.item_height();

        // `as usize` saturates: NaN and negative collapse to 0, oversized
        // values to usize::MAX. That is the clamp both extremes need.
        let scrolled_rows = (scroll_offset_px / h).floor() as usize;
        let start_index = scrolled_rows
            .saturating_sub(self.padding())
            .min(total_count);

        let viewport_rows = (viewport_height_px / h).ceil() as usize;
        let natural_visible = viewport_rows.saturating_add(self.padding().saturating_mul(2));

        let visible_count = total_count.saturating_sub(start_index).min(natural_visible);

        Window {
            start_index,
            visible_count,
            translate_offset: start_index as f64 * h,
        }
    }

    /// Total pixel height of the full list: `total_count * item_height`.
    #[must_use]
    pub fn total_height(&self, total_count: usize) -> f64 {
        total_count as f64 * self.item_height()
    }
}

/// The full derived snapshot a host consumes.
///
/// A `WindowState` is computed in one shot and replaced wholesale — it is
/// never mutated field by field, so a consumer can never observe the
/// translate offset of one window paired with the slice of another.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowState {
    /// The scroll offset this state was computed from, in pixels.
    pub scroll_offset: f64,
    /// First materialized index.
    pub start_index: usize,
    /// Number of materialized rows.
    pub visible_count: usize,
    /// Container offset in pixels (`start_index * item_height`).
    pub translate_offset: f64,
    /// Full list height in pixels (`total_count * item_height`).
    pub total_height: f64,
}

impl WindowState {
    /// Compute a complete snapshot from raw inputs.
    #[must_use]
    pub fn from_inputs(
        params: &WindowParams,
        scroll_offset_px: f64,
        viewport_height_px: f64,
        total_count: usize,
    ) -> Self {
        let window = params.compute(scroll_offset_px, viewport_height_px, total_count);
        Self {
            scroll_offset: scroll_offset_px,
            start_index: window.start_index,
            visible_count: window.visible_count,
            translate_offset: window.translate_offset,
            total_height: params.total_height(total_count),
        }
    }

    /// The window portion of this snapshot.
    #[must_use]
    pub fn window(&self) -> Window {
        Window {
            start_index: self.start_index,
            visible_count: self.visible_count,
            translate_offset: self.translate_offset,
        }
    }

    /// Index range `[start_index, start_index + visible_count)`.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index()
    }

    /// One past the last materialized index.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.start_index.saturating_add(self.visible_count)
    }

    /// True when nothing is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}
