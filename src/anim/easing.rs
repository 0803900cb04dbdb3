//! Easing functions
//!
//! An easing maps normalized progress to an interpolation weight. Clamped
//! easings see progress limited to [0, 1] and settle on their end value;
//! the unclamped `Ramp` keeps growing, which is what continuous rotation
//! wants (the consumer takes the angle as-is, no wrap needed for sin/cos).

use std::f64::consts::PI;

/// Easing function shapes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Easing {
    /// Constant-rate interpolation
    Linear,
    /// Sinusoidal ease-in-out: slow start, slow stop
    Smooth,
    /// Unbounded linear ramp, never clamped (continuous rotation)
    Ramp,
}

impl Easing {
    /// Get all easing types
    pub fn all() -> &'static [Easing] {
        &[Easing::Linear, Easing::Smooth, Easing::Ramp]
    }

    /// Get the name of this easing
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::Smooth => "Smooth",
            Easing::Ramp => "Ramp",
        }
    }

    /// Whether progress is clamped to [0, 1] before applying
    pub fn is_clamped(&self) -> bool {
        !matches!(self, Easing::Ramp)
    }

    /// Apply the easing to a progress value
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear | Easing::Ramp => t,
            Easing::Smooth => (1.0 - (PI * t).cos()) / 2.0,
        }
    }
}
