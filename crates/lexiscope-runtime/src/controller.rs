#![forbid(unsafe_code)]

//! Viewport controller: the orchestration hub that turns scroll, resize,
//! and collection events into fresh [`WindowState`] snapshots.
//!
//! # Design
//!
//! The controller owns four collaborators and nothing else:
//!
//! - a [`ScrollSurface`] it treats as the sole authority on scroll offset
//!   and viewport height,
//! - an [`ItemStore`] holding the collection being windowed,
//! - an [`Observable`] publishing the latest [`WindowState`] snapshot,
//! - a [`RenderScheduler`] coalescing scroll events to one recompute per
//!   frame.
//!
//! Scroll events are deferred through the scheduler; geometry and
//! collection events bypass it and recompute immediately, cancelling any
//! scroll recompute still in flight so a stale offset can never publish
//! over a fresher state.
//!
//! # Invariants
//!
//! 1. Every published snapshot is computed in one shot from a single
//!    (offset, viewport, count) reading. Consumers never see fields from
//!    two different computations.
//! 2. At most one snapshot is published per frame for scroll input, and
//!    it reflects the latest offset handed to [`ViewportController::on_scroll`].
//! 3. A collection swap resets the surface offset to zero before the
//!    recompute, so the new snapshot always starts at the origin, and its
//!    publication always notifies: the rows are new even when the
//!    geometry is not.
//! 4. Dropping the controller cancels any scheduled recompute; a frame
//!    that fires afterwards publishes nothing.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use lexiscope_core::WindowParams;
//! use lexiscope_runtime::{ItemStore, ManualFrameClock, MemorySurface, ViewportController};
//!
//! let surface = Rc::new(MemorySurface::with_height(640.0));
//! let clock = Rc::new(ManualFrameClock::new());
//! let store = Rc::new(ItemStore::from_items((0..1000).collect::<Vec<_>>()));
//! let controller = ViewportController::new(
//!     WindowParams::default(),
//!     surface.clone(),
//!     store,
//!     clock.clone(),
//! );
//!
//! controller.on_scroll(3200.0);
//! assert_eq!(controller.current_window().start_index, 0); // still queued
//!
//! clock.advance();
//! let state = controller.current_window();
//! assert_eq!(state.start_index, 90);
//! assert_eq!(state.visible_count, 40);
//! assert_eq!(state.translate_offset, 2880.0);
//! ```

use std::ops::Range;
use std::rc::Rc;
use std::sync::Arc;

use tracing::info_span;
use web_time::Instant;

use lexiscope_core::{WindowParams, WindowState};

use crate::reactive::{Observable, Subscription};
use crate::scheduler::{FrameClock, RenderScheduler};
use crate::store::ItemStore;
use crate::surface::ScrollSurface;

/// Compute a snapshot from live inputs and publish it.
///
/// Free function rather than a method so the scheduler's apply closure can
/// capture the collaborators directly, without holding the controller and
/// creating a reference cycle through its own scheduler.
///
/// `items_replaced` routes the publication through the identity-notify
/// path: a collection swap must reach subscribers even when the new
/// window compares equal to the old one.
fn publish<T: 'static>(
    params: &WindowParams,
    surface: &dyn ScrollSurface,
    store: &ItemStore<T>,
    window: &Observable<WindowState>,
    scroll_offset_px: f64,
    items_replaced: bool,
) {
    let started = Instant::now();
    let viewport_px = surface.viewport_height();
    let total_count = store.len();
    let span = info_span!(
        "window.recompute",
        offset_px = scroll_offset_px,
        viewport_px,
        total_count = total_count as u64,
        start_index = tracing::field::Empty,
        visible_count = tracing::field::Empty,
        duration_us = tracing::field::Empty,
    )
    .entered();

    let state = WindowState::from_inputs(params, scroll_offset_px, viewport_px, total_count);
    span.record("start_index", state.start_index as u64);
    span.record("visible_count", state.visible_count as u64);
    span.record("duration_us", started.elapsed().as_micros() as u64);

    // Notify inside the span so downstream reactions nest under it.
    // A swap notifies unconditionally: equal geometry can sit over
    // entirely new rows.
    if items_replaced {
        window.replace(state);
    } else {
        window.set(state);
    }
}

/// Drives windowing for one scrollable list.
///
/// Created with a parameter set, a surface, a store, and a frame clock;
/// from then on the host forwards raw events ([`on_scroll`], [`on_resize`],
/// [`on_collection_replaced`]) and consumes snapshots via
/// [`current_window`], [`subscribe`], or [`visible_items`].
///
/// [`on_scroll`]: ViewportController::on_scroll
/// [`on_resize`]: ViewportController::on_resize
/// [`on_collection_replaced`]: ViewportController::on_collection_replaced
/// [`current_window`]: ViewportController::current_window
/// [`subscribe`]: ViewportController::subscribe
/// [`visible_items`]: ViewportController::visible_items
pub struct ViewportController<T> {
    params: WindowParams,
    surface: Rc<dyn ScrollSurface>,
    store: Rc<ItemStore<T>>,
    window: Observable<WindowState>,
    scheduler: RenderScheduler<f64>,
}

impl<T: 'static> ViewportController<T> {
    /// Build a controller and compute the initial snapshot synchronously
    /// from the surface's current offset and height.
    pub fn new(
        params: WindowParams,
        surface: Rc<dyn ScrollSurface>,
        store: Rc<ItemStore<T>>,
        clock: Rc<dyn FrameClock>,
    ) -> Self {
        let window = Observable::new(WindowState::from_inputs(
            &params,
            surface.scroll_offset(),
            surface.viewport_height(),
            store.len(),
        ));
        let scheduler = {
            let surface = Rc::clone(&surface);
            let store = Rc::clone(&store);
            let window = window.clone();
            RenderScheduler::new(clock, move |offset_px: f64| {
                publish(
                    &params,
                    surface.as_ref(),
                    store.as_ref(),
                    &window,
                    offset_px,
                    false,
                );
            })
        };
        Self {
            params,
            surface,
            store,
            window,
            scheduler,
        }
    }

    /// Record a new scroll offset. The recompute is deferred to the next
    /// frame; offsets arriving before it fires supersede each other.
    pub fn on_scroll(&self, offset_px: f64) {
        self.scheduler.schedule(offset_px);
    }

    /// The viewport geometry changed. Recomputes immediately at the live
    /// offset, discarding any scroll recompute still queued.
    pub fn on_resize(&self) {
        self.refresh();
    }

    /// Recompute immediately from the surface's current offset and height.
    pub fn refresh(&self) {
        self.scheduler.cancel_pending();
        self.publish_now(self.surface.scroll_offset(), false);
    }

    /// The store's collection was swapped. Resets the surface to the
    /// origin and recomputes immediately so the snapshot can never pair a
    /// stale offset with the new collection.
    ///
    /// The publication always notifies, even when the new snapshot
    /// compares equal to the previous one: same-length collections at the
    /// origin produce identical geometry over different rows.
    pub fn on_collection_replaced(&self) {
        self.scheduler.cancel_pending();
        self.surface.set_scroll_offset(0.0);
        self.publish_now(0.0, true);
    }

    fn publish_now(&self, offset_px: f64, items_replaced: bool) {
        publish(
            &self.params,
            self.surface.as_ref(),
            self.store.as_ref(),
            &self.window,
            offset_px,
            items_replaced,
        );
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn current_window(&self) -> WindowState {
        self.window.get()
    }

    /// Observe snapshot changes. The callback fires on every publish that
    /// changes the state, and on every collection swap regardless;
    /// dropping the returned handle unsubscribes.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&WindowState) + 'static) -> Subscription {
        self.window.subscribe(callback)
    }

    /// The materialized rows for the latest snapshot, as a shared slice
    /// plus its position in the collection.
    #[must_use]
    pub fn visible_items(&self) -> WindowSlice<T> {
        let state = self.window.get();
        WindowSlice::new(self.store.items(), state.range())
    }

    /// The parameter set this controller was built with.
    #[must_use]
    pub fn params(&self) -> WindowParams {
        self.params
    }

    /// The store being windowed.
    #[must_use]
    pub fn store(&self) -> &Rc<ItemStore<T>> {
        &self.store
    }

    /// True while a scroll recompute is queued for the next frame.
    #[must_use]
    pub fn has_pending_recompute(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Number of scroll events superseded before their frame fired.
    #[must_use]
    pub fn coalesced_scrolls(&self) -> u64 {
        self.scheduler.coalesced_count()
    }
}

impl<T: 'static> std::fmt::Debug for ViewportController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("params", &self.params)
            .field("window", &self.window.get())
            .field("pending_recompute", &self.scheduler.has_pending())
            .finish()
    }
}

/// A window of items checked out of the store: the backing slice handle
/// plus the index range the latest snapshot materialized.
///
/// The range is clamped against the slice on construction, so a snapshot
/// that momentarily outlives a collection swap yields a shorter slice
/// rather than a panic.
#[derive(Debug, Clone)]
pub struct WindowSlice<T> {
    items: Arc<[T]>,
    range: Range<usize>,
}

impl<T> WindowSlice<T> {
    fn new(items: Arc<[T]>, range: Range<usize>) -> Self {
        let start = range.start.min(items.len());
        let end = range.end.min(items.len()).max(start);
        Self {
            items,
            range: start..end,
        }
    }

    /// The materialized rows.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items[self.range.clone()]
    }

    /// Collection index of the first row in the slice.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.range.start
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a WindowSlice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
