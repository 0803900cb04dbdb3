//! Animated values - interpolation between a start and end over a period

use super::easing::Easing;
use crate::geometry::Point;

/// A value family that can be interpolated linearly
pub trait Lerp: Copy {
    /// Interpolate between `start` and `end` at weight `t`
    ///
    /// `t` may fall outside [0, 1] for unclamped easings; implementations
    /// must extrapolate rather than clamp.
    fn lerp(start: Self, end: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

impl Lerp for Point {
    fn lerp(start: Self, end: Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

/// A time-stamped interpolation between two values
///
/// The current value is a pure function of the `now` timestamp the caller
/// passes in; the animation itself holds no clock and never runs in the
/// background. Retargeting goes through [`Animated::change`], which starts
/// the replacement from the old current value so there is no visible jump.
#[derive(Clone, Copy, Debug)]
pub struct Animated<T: Lerp> {
    start: T,
    end: T,
    start_time: f64,
    period: f64,
    easing: Easing,
}

impl<T: Lerp> Animated<T> {
    /// Animate from `start` to `end` over `period` seconds, beginning at `now`
    pub fn new(start: T, end: T, period: f64, easing: Easing, now: f64) -> Self {
        assert!(period > 0.0, "animation period must be positive");
        Self {
            start,
            end,
            start_time: now,
            period,
            easing,
        }
    }

    /// A degenerate animation whose value never changes
    pub fn still(value: T) -> Self {
        Self {
            start: value,
            end: value,
            start_time: 0.0,
            period: 1.0,
            easing: Easing::Linear,
        }
    }

    /// The current value at time `now`
    pub fn value(&self, now: f64) -> T {
        let mut progress = (now - self.start_time) / self.period;
        if self.easing.is_clamped() {
            progress = progress.clamp(0.0, 1.0);
        }
        T::lerp(self.start, self.end, self.easing.apply(progress))
    }

    /// Retarget to `end` over `period`, starting from the current value
    ///
    /// The returned animation begins at `self.value(now)`, so sampling it
    /// immediately after the call returns the same value the old animation
    /// would have - retargeting mid-flight never snaps.
    pub fn change(&self, end: T, period: f64, now: f64) -> Self {
        Self::new(self.value(now), end, period, self.easing, now)
    }

    /// Retarget with a different easing
    pub fn change_with_easing(&self, end: T, period: f64, easing: Easing, now: f64) -> Self {
        Self::new(self.value(now), end, period, easing, now)
    }

    /// The same animation re-based to begin at `start_time`
    ///
    /// Used by the export path to replay an animation deterministically
    /// from time zero.
    pub fn rebased(&self, start_time: f64) -> Self {
        Self {
            start_time,
            ..*self
        }
    }

    /// Whether a clamped animation has reached its end value at `now`
    pub fn is_settled(&self, now: f64) -> bool {
        self.easing.is_clamped() && now - self.start_time >= self.period
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn end(&self) -> T {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_linear_interpolation() {
        let a = Animated::new(0.0, 10.0, 2.0, Easing::Linear, 0.0);
        assert!((a.value(0.0) - 0.0).abs() < EPS);
        assert!((a.value(1.0) - 5.0).abs() < EPS);
        assert!((a.value(2.0) - 10.0).abs() < EPS);
        // Clamped: holds the end value forever
        assert!((a.value(50.0) - 10.0).abs() < EPS);
        // And the start value before its start time
        assert!((a.value(-1.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_point_interpolation() {
        let a = Animated::new(
            Point::new(0.0, 0.0),
            Point::new(4.0, -2.0),
            4.0,
            Easing::Linear,
            10.0,
        );
        let mid = a.value(12.0);
        assert!((mid.x - 2.0).abs() < EPS);
        assert!((mid.y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_still_is_constant() {
        let a = Animated::still(7.5);
        for now in [-100.0, 0.0, 0.3, 1e6] {
            assert!((a.value(now) - 7.5).abs() < EPS);
        }
    }

    #[test]
    fn test_ramp_exceeds_end() {
        let a = Animated::new(0.0, std::f64::consts::TAU, 5.0, Easing::Ramp, 0.0);
        // After two periods the rotation has swept two full turns
        let v = a.value(10.0);
        assert!((v - 2.0 * std::f64::consts::TAU).abs() < EPS);
    }

    #[test]
    fn test_change_preserves_continuity() {
        let a = Animated::new(0.0, 10.0, 2.0, Easing::Smooth, 0.0);
        let now = 0.7;
        let before = a.value(now);
        let b = a.change(-3.0, 1.5, now);
        assert!((b.value(now) - before).abs() < EPS);
        // And it ends where asked
        assert!((b.value(now + 1.5) - (-3.0)).abs() < EPS);
    }

    #[test]
    fn test_rebased_replays_from_zero() {
        let a = Animated::new(1.0, 2.0, 4.0, Easing::Linear, 123.0);
        let r = a.rebased(0.0);
        assert!((r.value(2.0) - a.value(125.0)).abs() < EPS);
    }

    #[test]
    fn test_is_settled() {
        let a = Animated::new(0.0, 1.0, 3.0, Easing::Smooth, 1.0);
        assert!(!a.is_settled(2.0));
        assert!(a.is_settled(4.0));

        let ramp = Animated::new(0.0, 1.0, 3.0, Easing::Ramp, 1.0);
        assert!(!ramp.is_settled(100.0));
    }
}
