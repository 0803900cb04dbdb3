//! Animation module - time-driven parameter interpolation
//!
//! This module provides:
//! - `Easing` functions that shape animation timing
//! - `Animated<T>`, a generic interpolator between two values over a period
//! - `Lerp`, the trait connecting value types to the interpolator
//! - `SystemClock`, a wall-clock helper for callers
//!
//! The engine has no background execution: every current value is a pure
//! function of a `now` timestamp supplied by the caller, so the same
//! animation can be driven by a live render loop or stepped frame-by-frame
//! for deterministic export.

mod animated;
mod clock;
mod easing;

pub use animated::{Animated, Lerp};
pub use clock::SystemClock;
pub use easing::Easing;
