//! Wall-clock helper for callers driving animations in real time

use std::time::Instant;

/// Monotonic wall-clock seconds since construction
///
/// The core never reads a clock itself; a live render loop constructs one
/// of these and passes `now()` into every query. Export paths skip it
/// entirely and feed synthetic timestamps.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}
