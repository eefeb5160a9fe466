#![forbid(unsafe_code)]

//! Core: pure window arithmetic for virtualized list rendering.
//!
//! # Role in LexiScope
//! `lexiscope-core` is the math layer. Given a scroll offset, a viewport
//! height, and a backing-collection length, it computes the minimal
//! contiguous index range that must be materialized as visible elements,
//! plus the single translate offset that positions the rendered band
//! inside the full (unrendered) list.
//!
//! # Primary responsibilities
//! - **WindowParams**: validated per-session geometry (item height px,
//!   padding rows).
//! - **Window**: the materialization range and its translate offset.
//! - **WindowState**: the full derived snapshot a host consumes, always
//!   replaced as one tuple.
//!
//! # How it fits in the system
//! The runtime (`lexiscope-runtime`) feeds live scroll/resize/replacement
//! signals into this crate and publishes the resulting snapshots. Nothing
//! here has side effects, stored state, or a failure path past
//! construction, so every function is callable at any frequency.

pub mod params;
pub mod window;

pub use params::{DEFAULT_ITEM_HEIGHT, DEFAULT_PADDING, ParamsError, WindowParams};
pub use window::{Window, WindowState};
