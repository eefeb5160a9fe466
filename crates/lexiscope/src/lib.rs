#![forbid(unsafe_code)]

//! LexiScope public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the pure window arithmetic from `lexiscope-core` and the
//! stateful runtime from `lexiscope-runtime`, and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Quick start
//!
//! ```
//! use std::rc::Rc;
//! use lexiscope::prelude::*;
//!
//! // Host wiring: the surface and frame clock come from the embedding
//! // UI layer. Here both are in-memory stand-ins.
//! let surface = Rc::new(MemorySurface::with_height(640.0));
//! let clock = Rc::new(ManualFrameClock::new());
//! let store = Rc::new(ItemStore::from_items(
//!     (0..1000).map(|i| format!("entry {i}")).collect::<Vec<_>>(),
//! ));
//! let controller = Rc::new(ViewportController::new(
//!     WindowParams::default(),
//!     surface.clone(),
//!     store,
//!     clock.clone(),
//! ));
//! let binding = DataBinding::connect(controller.clone());
//!
//! // A scroll event defers its recompute to the next frame.
//! surface.set_scroll_offset(3200.0);
//! controller.on_scroll(3200.0);
//! clock.advance();
//! assert_eq!(controller.current_window().start_index, 90);
//! assert_eq!(controller.current_window().visible_count, 40);
//!
//! // Swapping the collection resets to the origin immediately.
//! binding.replace_items(vec!["sole entry".to_string()]);
//! assert_eq!(controller.current_window().visible_count, 1);
//! assert_eq!(surface.scroll_offset(), 0.0);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use lexiscope_core::{
    DEFAULT_ITEM_HEIGHT, DEFAULT_PADDING, ParamsError, Window, WindowParams, WindowState,
};

// --- Runtime re-exports ----------------------------------------------------

pub use lexiscope_runtime::{
    DataBinding, FrameClock, FrameJob, InlineClock, ItemStore, ManualFrameClock, MemorySurface,
    Observable, RenderScheduler, ScrollSurface, Subscription, ViewportController, WindowSlice,
};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DataBinding, FrameClock, InlineClock, ItemStore, ManualFrameClock, MemorySurface,
        ParamsError, ScrollSurface, Subscription, ViewportController, Window, WindowParams,
        WindowSlice, WindowState,
    };

    pub use crate::{core, runtime};
}

pub use lexiscope_core as core;
pub use lexiscope_runtime as runtime;
