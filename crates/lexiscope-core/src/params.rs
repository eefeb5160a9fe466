#![forbid(unsafe_code)]

//! Per-session window geometry: item height and padding band.
//!
//! # Design
//!
//! [`WindowParams`] is fixed at construction and shared by value (it is
//! `Copy`). The item height is the one input that can poison every later
//! division, so it is validated once here — finite and strictly positive —
//! and never re-checked on the hot path.
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `item_height` | 32.0 px | uniform pixel height of one row |
//! | `padding` | 10 rows | extra rows rendered above and below the viewport band |

use std::fmt;

/// Default row height in pixels.
pub const DEFAULT_ITEM_HEIGHT: f64 = 32.0;

/// Default number of padding rows rendered beyond each edge of the
/// viewport band.
pub const DEFAULT_PADDING: usize = 10;

/// Validated window geometry.
///
/// Construct with [`WindowParams::new`] or use [`WindowParams::default`]
/// (32 px rows, 10 padding rows). The item height is guaranteed finite
/// and `> 0` for the lifetime of the value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowParams {
    item_height: f64,
    padding: usize,
}

impl WindowParams {
    /// Create params with an explicit item height (px) and padding row
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidItemHeight`] if `item_height` is not
    /// finite or is `<= 0.0`. A zero height would turn the scroll-offset
    /// division into a precondition violation at every frame, so it is
    /// rejected here instead.
    pub fn new(item_height: f64, padding: usize) -> Result<Self, ParamsError> {
        if !item_height.is_finite() || item_height <= 0.0 {
            return Err(ParamsError::InvalidItemHeight(item_height));
        }
        Ok(Self {
            item_height,
            padding,
        })
    }

    /// Uniform row height in pixels. Always finite and `> 0`.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Padding rows rendered beyond each edge of the viewport band.
    #[must_use]
    pub fn padding(&self) -> usize {
        self.padding
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Construction-time validation failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamsError {
    /// Item height was zero, negative, NaN, or infinite.
    InvalidItemHeight(f64),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::InvalidItemHeight(h) => {
                write!(f, "item height must be finite and > 0 px, got {h}")
            }
        }
    }
}

impl std::error::Error for ParamsError {}
