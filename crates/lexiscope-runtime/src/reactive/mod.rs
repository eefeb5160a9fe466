#![forbid(unsafe_code)]

//! Observer primitives: a version-tracked value cell with change
//! notification.
//!
//! The engine deliberately avoids a dependency-tracking reactivity
//! runtime. Consumers subscribe to one notification per published value
//! and pull the latest snapshot; RAII [`Subscription`] guards scope the
//! registration.

pub mod observable;

pub use observable::{Observable, Subscription};
