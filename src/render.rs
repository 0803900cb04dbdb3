//! Renderer-facing output types
//!
//! The core computes geometry and parameter values; an external renderer
//! rasterizes them. Each visible shape yields one [`ShapeFrame`] per
//! queried instant: a transform, a color, the full path with its
//! replication recipe, and the current partial reveal trace.

use crate::geometry::{Point, Transform};
use crate::path::PathEl;

/// An HSV color (h in degrees [0, 360), s and v in [0, 1])
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to 8-bit RGB for renderers that want bytes
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let c = self.v * self.s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.v - c;
        let byte = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(r), byte(g), byte(b))
    }
}

/// How to repeat the full path to tile the symmetric copies
///
/// The renderer draws the full path, then translates its coordinate frame
/// by `step` and rotates it by `angle` about `pivot`, and repeats - the
/// offsets accumulate, exactly `repeats` draws in total. The partial trace
/// is drawn once after the last copy, still under all `repeats` accumulated
/// steps, so the reveal traces out where the next copy will land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Replication {
    /// Total number of full-path draws (revealed copies so far, plus one)
    pub repeats: usize,
    /// Per-copy translation: last stroke point minus first
    pub step: Point,
    /// Pivot of the per-copy rotation: the first stroke point
    pub pivot: Point,
    /// Per-copy rotation angle: the shape's ideal symmetry angle
    pub angle: f64,
}

impl Replication {
    /// Expand the recipe into one absolute transform per copy
    ///
    /// Convenience for renderers without a stateful coordinate stack; copy
    /// `i` is drawn as `base` composed with `i` accumulated step-rotations.
    pub fn copy_transforms(&self, base: Transform) -> Vec<Transform> {
        let mut transforms = Vec::with_capacity(self.repeats);
        let mut accumulated = Transform::IDENTITY;
        let step = self.step_transform();
        for _ in 0..self.repeats {
            transforms.push(accumulated.then(base));
            accumulated = step.then(accumulated);
        }
        transforms
    }

    /// Absolute transform for the reveal-in-progress trace
    ///
    /// The trace is drawn after the last copy, under the full accumulation
    /// of `repeats` step-rotations: it lands exactly where copy `repeats`
    /// would be drawn next.
    pub fn partial_transform(&self, base: Transform) -> Transform {
        let step = self.step_transform();
        let mut accumulated = Transform::IDENTITY;
        for _ in 0..self.repeats {
            accumulated = step.then(accumulated);
        }
        accumulated.then(base)
    }

    // Each copy rotates about the first point, then steps along the chord
    fn step_transform(&self) -> Transform {
        Transform::rotation_about(self.pivot, self.angle).then(Transform::translation(self.step))
    }
}

/// Everything a renderer needs to draw one shape at one instant
#[derive(Clone, Debug)]
pub struct ShapeFrame<'a> {
    /// Translate/scale/rotate composition from the shape's animations
    pub transform: Transform,
    /// Hue is fixed per shape; value carries the current brightness
    pub color: Hsv,
    /// The smoothed stroke path (closed once the stroke has finished)
    pub full_path: &'a [PathEl],
    /// How many times, and how, to repeat `full_path`
    pub replication: Replication,
    /// The reveal-in-progress trace, drawn once under
    /// [`Replication::partial_transform`]
    pub partial: &'a [PathEl],
}
