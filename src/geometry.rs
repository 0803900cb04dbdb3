//! Geometry primitives - 2D points and affine transforms
//!
//! Everything downstream (paths, packing, animation targets) is built on
//! `Point`. Coordinates are real-valued; the caller decides the unit
//! (screen pixels for live drawing, abstract grid units for packings).

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// An immutable 2D coordinate
///
/// `Point` is a plain value type: all operations return new points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (other - *self).norm()
    }

    /// Distance from the origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction (angle in radians) from this point to another
    ///
    /// Returned by `atan2`, so the result lies in (-π, π].
    pub fn direction(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point reached by walking `dist` units in `direction` radians
    pub fn point_in_direction(&self, direction: f64, dist: f64) -> Point {
        Point::new(
            self.x + dist * direction.cos(),
            self.y + dist * direction.sin(),
        )
    }

    /// Midpoint between this point and another
    pub fn midpoint(&self, other: Point) -> Point {
        (*self + other) / 2.0
    }

    /// Rotate this point about `pivot` by `angle` radians
    pub fn rotated_about(&self, pivot: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let d = *self - pivot;
        Point::new(
            pivot.x + d.x * cos - d.y * sin,
            pivot.y + d.x * sin + d.y * cos,
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// A viewport size in the caller's units (typically pixels)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An affine 2D transform
///
/// Stored as the six coefficients of
///
/// ```text
/// | a c e |
/// | b d f |
/// ```
///
/// mapping (x, y) to (a·x + c·y + e, b·x + d·y + f).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    coeffs: [f64; 6],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Translation by an offset vector
    pub fn translation(offset: Point) -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 1.0, offset.x, offset.y],
        }
    }

    /// Uniform scale about a pivot point
    pub fn scale_about(pivot: Point, factor: f64) -> Self {
        Self {
            coeffs: [
                factor,
                0.0,
                0.0,
                factor,
                pivot.x * (1.0 - factor),
                pivot.y * (1.0 - factor),
            ],
        }
    }

    /// Rotation about a pivot point by `angle` radians
    pub fn rotation_about(pivot: Point, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            coeffs: [
                cos,
                sin,
                -sin,
                cos,
                pivot.x - pivot.x * cos + pivot.y * sin,
                pivot.y - pivot.x * sin - pivot.y * cos,
            ],
        }
    }

    /// This transform followed by `next` (i.e. `next ∘ self`)
    pub fn then(&self, next: Transform) -> Transform {
        let [a1, b1, c1, d1, e1, f1] = self.coeffs;
        let [a2, b2, c2, d2, e2, f2] = next.coeffs;
        Transform {
            coeffs: [
                a2 * a1 + c2 * b1,
                b2 * a1 + d2 * b1,
                a2 * c1 + c2 * d1,
                b2 * c1 + d2 * d1,
                a2 * e1 + c2 * f1 + e2,
                b2 * e1 + d2 * f1 + f2,
            ],
        }
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// The raw coefficients `[a, b, c, d, e, f]`
    pub fn coeffs(&self) -> [f64; 6] {
        self.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point::new(1.5, -0.5));
    }

    #[test]
    fn test_distance_and_direction() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < EPS);

        let up = Point::new(0.0, 1.0);
        assert!((a.direction(up) - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_point_in_direction_round_trip() {
        let a = Point::new(2.0, -1.0);
        let b = Point::new(-4.0, 3.5);
        let c = a.point_in_direction(a.direction(b), a.distance(b));
        assert!(approx(b, c));
    }

    #[test]
    fn test_rotated_about() {
        let p = Point::new(2.0, 1.0);
        let pivot = Point::new(1.0, 1.0);
        let r = p.rotated_about(pivot, FRAC_PI_2);
        assert!(approx(r, Point::new(1.0, 2.0)));

        // Full turn is a no-op
        let full = p.rotated_about(pivot, 2.0 * PI);
        assert!(approx(full, p));
    }

    #[test]
    fn test_transform_translation() {
        let t = Transform::translation(Point::new(5.0, -2.0));
        assert!(approx(t.apply(Point::new(1.0, 1.0)), Point::new(6.0, -1.0)));
    }

    #[test]
    fn test_transform_scale_about_pivot() {
        let pivot = Point::new(1.0, 1.0);
        let t = Transform::scale_about(pivot, 2.0);
        // Pivot stays fixed
        assert!(approx(t.apply(pivot), pivot));
        assert!(approx(t.apply(Point::new(2.0, 1.0)), Point::new(3.0, 1.0)));
    }

    #[test]
    fn test_transform_rotation_about_pivot() {
        let pivot = Point::new(1.0, 0.0);
        let t = Transform::rotation_about(pivot, PI);
        assert!(approx(t.apply(Point::new(2.0, 0.0)), Point::new(0.0, 0.0)));
        assert!(approx(t.apply(pivot), pivot));
    }

    #[test]
    fn test_transform_composition_matches_sequential_apply() {
        let a = Transform::scale_about(Point::new(1.0, 2.0), 1.5);
        let b = Transform::rotation_about(Point::new(-1.0, 0.5), 0.7);
        let p = Point::new(3.0, -2.0);
        let composed = a.then(b).apply(p);
        let sequential = b.apply(a.apply(p));
        assert!(approx(composed, sequential));
    }
}
