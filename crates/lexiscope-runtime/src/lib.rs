#![forbid(unsafe_code)]

//! Runtime: scroll, resize, and replacement signals in; window snapshots out.
//!
//! # Role in LexiScope
//! `lexiscope-runtime` wraps the pure arithmetic of `lexiscope-core` with
//! the stateful pieces a live view needs: the observer cell that publishes
//! atomic [`WindowState`](lexiscope_core::WindowState) snapshots, the
//! frame-coalescing scheduler that collapses scroll bursts into one
//! recompute per refresh, the item store the window is drawn from, and the
//! data binding that resets the viewport when the collection is swapped.
//!
//! # Primary responsibilities
//! - **ViewportController**: bridges the scroll surface to the window
//!   computation and owns the published snapshot.
//! - **RenderScheduler / FrameClock**: at most one recompute per frame,
//!   latest offset wins, pending work dies with its owner.
//! - **ItemStore**: shared-slice backing collection with wholesale
//!   replacement.
//! - **DataBinding**: collection swap → scroll reset → immediate recompute.
//!
//! # Concurrency model
//! Single-threaded and cooperative. Everything here runs inside the
//! caller's event or frame callback; the only deferral is the frame
//! clock's, and nothing blocks.

pub mod binding;
pub mod controller;
pub mod reactive;
pub mod scheduler;
pub mod store;
pub mod surface;

pub use binding::DataBinding;
pub use controller::{ViewportController, WindowSlice};
pub use reactive::{Observable, Subscription};
pub use scheduler::{FrameClock, FrameJob, InlineClock, ManualFrameClock, RenderScheduler};
pub use store::ItemStore;
pub use surface::{MemorySurface, ScrollSurface};
