#![forbid(unsafe_code)]

//! Backing collection handle: an ordered shared slice, replaceable as a
//! whole.
//!
//! # Design
//!
//! The engine never mutates items and never copies them; it reads the
//! collection's length and materializes contiguous ranges of it. The
//! store therefore keeps items in an `Arc<[T]>` — handing out the whole
//! slice is a reference-count bump, and a window over it is the slice
//! plus a range.
//!
//! Replacement is an identity event: a search that narrows a vocabulary
//! list swaps in a new collection, and observers must react even if the
//! new items happen to compare equal to the old. `replace` notifies
//! unconditionally and requires no `PartialEq` on the item type.

use std::sync::Arc;

use tracing::info_span;

use crate::reactive::{Observable, Subscription};

/// Ordered, wholesale-replaceable item collection.
///
/// Cloning a store yields another handle to the same collection; handles
/// share items, version, and subscribers.
pub struct ItemStore<T> {
    items: Observable<Arc<[T]>>,
}

impl<T> Clone for ItemStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: 'static> ItemStore<T> {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Observable::new(Arc::from(Vec::new())),
        }
    }

    /// A collection seeded with `items`.
    #[must_use]
    pub fn from_items(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: Observable::new(items.into()),
        }
    }

    /// Swap the whole collection and notify every replacement observer,
    /// even if the new items compare equal to the old.
    pub fn replace(&self, items: impl Into<Arc<[T]>>) {
        let items: Arc<[T]> = items.into();
        let _span = info_span!(
            "collection.replace",
            old_len = self.len() as u64,
            new_len = items.len() as u64
        )
        .entered();
        self.items.replace(items);
    }

    /// The current collection as a shared slice (reference-count bump,
    /// no copy).
    #[must_use]
    pub fn items(&self) -> Arc<[T]> {
        self.items.get()
    }

    /// Current collection length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.with(|v| v.len())
    }

    /// True when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of replacements so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.items.version()
    }

    /// Run `callback` after every replacement. The guard scopes the
    /// registration.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn on_replace(&self, callback: impl Fn() + 'static) -> Subscription {
        self.items.subscribe(move |_| callback())
    }

    /// Observers currently registered (including not-yet-pruned dead
    /// ones).
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.items.subscriber_count()
    }
}

impl<T: 'static> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ItemStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("len", &self.items.with(|v| v.len()))
            .field("version", &self.items.version())
            .finish()
    }
}
