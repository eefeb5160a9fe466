#![forbid(unsafe_code)]

//! Data binding: wires an [`ItemStore`] swap to the controller's
//! collection-replaced path.
//!
//! The binding subscribes to the controller's store and forwards every
//! replace to [`ViewportController::on_collection_replaced`], so a swap
//! resets the scroll position and republishes in the same call, before
//! `replace` returns to the caller. The subscriber captures the
//! controller weakly; the binding is the only strong link it adds, so
//! dropping the binding both stops the forwarding and releases the
//! controller.

use std::rc::Rc;
use std::sync::Arc;

use crate::controller::ViewportController;
use crate::reactive::Subscription;

/// Keeps one controller in sync with its store's collection.
pub struct DataBinding<T> {
    controller: Rc<ViewportController<T>>,
    _subscription: Subscription,
}

impl<T: 'static> DataBinding<T> {
    /// Subscribe `controller` to its own store. Every replace on the
    /// store now triggers the scroll reset and immediate recompute.
    pub fn connect(controller: Rc<ViewportController<T>>) -> Self {
        let weak = Rc::downgrade(&controller);
        let subscription = controller.store().on_replace(move || {
            if let Some(controller) = weak.upgrade() {
                controller.on_collection_replaced();
            }
        });
        Self {
            controller,
            _subscription: subscription,
        }
    }

    /// Swap the collection. The reset and recompute run synchronously
    /// inside this call, so the new snapshot is visible on return.
    pub fn replace_items(&self, items: impl Into<Arc<[T]>>) {
        self.controller.store().replace(items);
    }

    /// The bound controller.
    #[must_use]
    pub fn controller(&self) -> &Rc<ViewportController<T>> {
        &self.controller
    }
}

impl<T: 'static> std::fmt::Debug for DataBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataBinding")
            .field("controller", &self.controller)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualFrameClock;
    use crate::store::ItemStore;
    use crate::surface::{MemorySurface, ScrollSurface};
    use lexiscope_core::WindowParams;
    use std::cell::Cell;

    fn rig(total: usize) -> (Rc<MemorySurface>, Rc<ManualFrameClock>, DataBinding<usize>) {
        let surface = Rc::new(MemorySurface::with_height(640.0));
        let clock = Rc::new(ManualFrameClock::new());
        let store = Rc::new(ItemStore::from_items((0..total).collect::<Vec<_>>()));
        let controller = Rc::new(ViewportController::new(
            WindowParams::default(),
            surface.clone(),
            store,
            clock.clone(),
        ));
        (surface, clock, DataBinding::connect(controller))
    }

    #[test]
    fn replace_resets_scroll_and_republishes_synchronously() {
        let (surface, clock, binding) = rig(1000);
        surface.set_scroll_offset(3200.0);
        binding.controller().on_scroll(3200.0);
        clock.advance();
        assert_eq!(binding.controller().current_window().start_index, 90);

        binding.replace_items((0..3usize).collect::<Vec<_>>());

        assert_eq!(surface.scroll_offset(), 0.0);
        let state = binding.controller().current_window();
        assert_eq!(state.start_index, 0);
        assert_eq!(state.visible_count, 3);
        assert_eq!(state.total_height, 96.0);
    }

    #[test]
    fn replace_through_the_store_triggers_the_same_path() {
        let (surface, clock, binding) = rig(1000);
        surface.set_scroll_offset(3200.0);
        binding.controller().on_scroll(3200.0);
        clock.advance();

        binding
            .controller()
            .store()
            .replace((0..5usize).collect::<Vec<_>>());

        assert_eq!(surface.scroll_offset(), 0.0);
        assert_eq!(binding.controller().current_window().visible_count, 5);
    }

    #[test]
    fn same_length_replacement_still_republishes() {
        let (_surface, _clock, binding) = rig(100);
        let publishes = Rc::new(Cell::new(0u32));
        let _sub = binding.controller().subscribe({
            let publishes = publishes.clone();
            move |_| publishes.set(publishes.get() + 1)
        });

        binding.replace_items((100..200usize).collect::<Vec<_>>());

        assert_eq!(publishes.get(), 1);
        assert_eq!(binding.controller().visible_items().as_slice()[0], 100);
    }

    #[test]
    fn replace_discards_a_queued_scroll() {
        let (surface, clock, binding) = rig(1000);
        surface.set_scroll_offset(3200.0);
        binding.controller().on_scroll(3200.0);
        assert!(binding.controller().has_pending_recompute());

        binding.replace_items((0..3usize).collect::<Vec<_>>());
        assert!(!binding.controller().has_pending_recompute());

        clock.advance();
        let state = binding.controller().current_window();
        assert_eq!(state.start_index, 0);
        assert_eq!(state.scroll_offset, 0.0);
        assert_eq!(surface.scroll_offset(), 0.0);
    }

    #[test]
    fn dropping_the_binding_stops_the_forwarding() {
        let (surface, clock, binding) = rig(1000);
        let controller = binding.controller().clone();
        let store = controller.store().clone();
        surface.set_scroll_offset(3200.0);
        binding.controller().on_scroll(3200.0);
        clock.advance();
        drop(binding);

        store.replace((0..3usize).collect::<Vec<_>>());

        // No reset, no recompute: the stale snapshot stands.
        assert_eq!(controller.current_window().start_index, 90);
        assert_eq!(surface.scroll_offset(), 3200.0);
    }

    #[test]
    fn binding_adds_no_cycle_that_leaks_the_controller() {
        let (_surface, _clock, binding) = rig(10);
        let weak = Rc::downgrade(binding.controller());
        drop(binding);
        assert!(weak.upgrade().is_none());
    }
}
