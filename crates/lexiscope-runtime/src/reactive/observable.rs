#![forbid(unsafe_code)]

//! Version-tracked value cell with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] holds a value in shared single-threaded storage
//! (`Rc<RefCell<..>>`). Mutations notify live subscribers in registration
//! order. Two mutation flavors exist because the engine has two kinds of
//! state:
//!
//! - [`set`](Observable::set) is equality-gated: publishing an unchanged
//!   [`WindowState`](lexiscope_core::WindowState) must not re-notify, or a
//!   duplicate offset would re-render the same frame.
//! - [`replace`](Observable::replace) is unconditional: a backing
//!   collection swap is an identity event, and must notify even when the
//!   new items compare equal to the old. It therefore needs no
//!   `PartialEq` on `T` at all, which keeps stored items opaque.
//!
//! Subscribers are held as `Weak` references; dropping the
//! [`Subscription`] guard retires the callback, and dead entries are
//! pruned lazily on the next notification.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation from a subscriber** is allowed (no borrow is
//!   held while callbacks run), but the remaining callbacks of the outer
//!   notification still receive the value captured when that notification
//!   began.
//! - **Hoarded guards**: a `Subscription` stored forever keeps its
//!   callback alive; there is no other unsubscription path.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug_span;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    /// Weak subscriber list; dead entries are pruned on notify.
    subscribers: Vec<Weak<dyn Fn(&T)>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` yields another handle to the same cell: both
/// see the same value, version, and subscribers.
///
/// # Invariants
///
/// 1. `version` starts at 0 and bumps by 1 on every notifying mutation.
/// 2. `set(v)` with `v == current` is a no-op; `replace(v)` never is.
/// 3. Callbacks fire in registration order, after the value is stored.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T> Observable<T> {
    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of notifying mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Live subscriber count, counting entries not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a cell holding `value`, at version 0, with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value unconditionally and notify, even if the new
    /// value compares equal to the old (no comparison is performed).
    pub fn replace(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Register `callback` to run after every notifying mutation.
    ///
    /// The returned guard owns the registration: dropping it retires the
    /// callback. The callback receives the freshly stored value by
    /// reference.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Callback<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Prune dead subscribers, then fire the live ones in order.
    ///
    /// Callbacks are collected first and run without any internal borrow
    /// held, so they may freely read or mutate this observable.
    fn notify(&self) {
        let callbacks: Vec<Callback<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        if callbacks.is_empty() {
            return;
        }

        let _span =
            debug_span!("observable.notify", subscribers = callbacks.len() as u64).entered();

        // One clone for the whole pass; re-entrant mutations do not
        // retarget callbacks already queued in this pass.
        let value = self.inner.borrow().value.clone();
        for callback in &callbacks {
            callback(&value);
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Store `value` if it differs from the current one, then notify.
    /// Equal values are a no-op: no version bump, no notification.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place; notifies only if the result differs.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                false
            } else {
                inner.version += 1;
                true
            }
        };
        if changed {
            self.notify();
        }
    }
}

/// RAII guard for a subscriber registration.
///
/// Holds the only strong reference to the callback; dropping the guard
/// makes the observable's `Weak` entry dead, and it is pruned on the next
/// notification.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn new_starts_at_version_zero() {
        let obs = Observable::new(7);
        assert_eq!(obs.get(), 7);
        assert_eq!(obs.version(), 0);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn set_stores_and_bumps_version() {
        let obs = Observable::new(1);
        obs.set(2);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn set_equal_value_is_a_no_op() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.set(5);
        assert_eq!(obs.version(), 0);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn replace_equal_value_still_notifies() {
        let obs = Observable::new(5);
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.replace(5);
        assert_eq!(obs.version(), 1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn replace_needs_no_partial_eq() {
        // Opaque type: no PartialEq anywhere.
        struct Opaque;
        let obs = Observable::new(Rc::new(Opaque));
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(true));

        obs.replace(Rc::new(Opaque));
        assert!(fired.get());
    }

    #[test]
    fn subscriber_sees_the_stored_value() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(-1));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| s.set(*v));

        obs.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn subscribers_fire_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _s1 = obs.subscribe(move |_| o1.borrow_mut().push("first"));
        let o2 = Rc::clone(&order);
        let _s2 = obs.subscribe(move |_| o2.borrow_mut().push("second"));

        obs.set(1);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn dropping_the_guard_unsubscribes() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.set(1);
        assert_eq!(fired.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn dead_subscribers_are_pruned_on_notify() {
        let obs = Observable::new(0);
        {
            let _sub = obs.subscribe(|_| {});
        }
        assert_eq!(obs.subscriber_count(), 1);
        obs.set(1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn dead_subscriber_does_not_block_live_one() {
        let obs = Observable::new(0);
        let fired = Rc::new(Cell::new(0u32));

        let dead = obs.subscribe(|_| {});
        let f = Rc::clone(&fired);
        let _live = obs.subscribe(move |_| f.set(f.get() + 1));
        drop(dead);

        obs.set(1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn clone_shares_value_and_subscribers() {
        let a = Observable::new(0);
        let b = a.clone();
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let _sub = a.subscribe(move |v| s.set(*v));

        b.set(9);
        assert_eq!(a.get(), 9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn update_notifies_only_on_change() {
        let obs = Observable::new(vec![1, 2]);
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let _sub = obs.subscribe(move |_| f.set(f.get() + 1));

        obs.update(|v| v.push(3));
        assert_eq!(fired.get(), 1);
        assert_eq!(obs.version(), 1);

        obs.update(|_| {});
        assert_eq!(fired.get(), 1);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn with_borrows_without_cloning() {
        let obs = Observable::new(vec![1, 2, 3]);
        let sum: i32 = obs.with(|v| v.iter().sum());
        assert_eq!(sum, 6);
    }

    #[test]
    fn reentrant_set_from_callback_is_allowed() {
        let obs = Observable::new(0);
        let inner = obs.clone();
        let _sub = obs.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });

        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
    }

    #[test]
    fn reads_during_callback_see_the_stored_value() {
        let obs = Observable::new(0);
        let handle = obs.clone();
        let seen = Rc::new(Cell::new(-1));
        let s = Rc::clone(&seen);
        let _sub = obs.subscribe(move |_| s.set(handle.get()));

        obs.set(7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn debug_reports_state() {
        let obs = Observable::new(42);
        let _sub = obs.subscribe(|_| {});
        let dbg = format!("{obs:?}");
        assert!(dbg.contains("Observable"));
        assert!(dbg.contains("42"));
        assert!(dbg.contains("subscribers: 1"));
    }
}
