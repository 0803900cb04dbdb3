//! Path types - smoothed freehand strokes and reveal traces
//!
//! A finished stroke becomes an immutable [`Path`] built by [`PathBuilder`],
//! which smooths the raw samples by drawing a quadratic curve through the
//! midpoint of each consecutive pair of accepted anchors. The animated
//! reveal uses a [`TracePath`], a plain polyline that only grows or resets.

use crate::geometry::Point;

/// A single path segment, mirroring the verbs a renderer consumes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEl {
    /// Start a new subpath at the point
    MoveTo(Point),
    /// Quadratic curve with a control point and an end point
    QuadTo(Point, Point),
    /// Straight segment to the point
    LineTo(Point),
}

/// An immutable, completed stroke path
///
/// Produced by [`PathBuilder::finish`]. The segment list never changes
/// after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    elements: Vec<PathEl>,
}

impl Path {
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Accumulates a smoothed curve from discrete input samples
///
/// Points closer than `min_spacing` to the last accepted anchor are
/// silently dropped (anti-jitter). Between accepted anchors the stored
/// geometry is a quadratic curve through their midpoint, so the rendered
/// stroke has no per-sample corners.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    elements: Vec<PathEl>,
    last: Point,
    min_spacing: f64,
}

impl PathBuilder {
    /// Start a path at a single anchor
    pub fn start(point: Point, min_spacing: f64) -> Self {
        Self {
            elements: vec![PathEl::MoveTo(point)],
            last: point,
            min_spacing,
        }
    }

    /// Offer the next sampled point
    ///
    /// Returns `true` if the point was accepted as an anchor, `false` if it
    /// fell inside the anti-jitter radius and was dropped.
    pub fn add(&mut self, point: Point) -> bool {
        if point.distance(self.last) < self.min_spacing {
            return false;
        }
        let mid = self.last.midpoint(point);
        self.elements.push(PathEl::QuadTo(self.last, mid));
        self.last = point;
        true
    }

    /// The last accepted anchor
    pub fn last(&self) -> Point {
        self.last
    }

    /// The segments accumulated so far (for rendering an in-progress stroke)
    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    /// Close the path with a final straight segment and freeze it
    pub fn finish(mut self) -> Path {
        self.elements.push(PathEl::LineTo(self.last));
        Path {
            elements: self.elements,
        }
    }
}

/// The reveal-in-progress polyline
///
/// Grows one segment at a time while a shape traces out its symmetric
/// copies, and resets to a fresh start point at the beginning of each copy.
#[derive(Clone, Debug, Default)]
pub struct TracePath {
    elements: Vec<PathEl>,
}

impl TracePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all segments and restart at `point`
    pub fn restart(&mut self, point: Point) {
        self.elements.clear();
        self.elements.push(PathEl::MoveTo(point));
    }

    /// Extend the trace with a straight segment
    pub fn line_to(&mut self, point: Point) {
        self.elements.push(PathEl::LineTo(point));
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_smooths_through_midpoints() {
        let mut b = PathBuilder::start(Point::new(0.0, 0.0), 1.0);
        assert!(b.add(Point::new(10.0, 0.0)));
        assert!(b.add(Point::new(10.0, 10.0)));
        let path = b.finish();

        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
                PathEl::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_builder_drops_jitter() {
        let mut b = PathBuilder::start(Point::new(0.0, 0.0), 8.0);
        // Inside the spacing radius: dropped, anchor unchanged
        assert!(!b.add(Point::new(3.0, 3.0)));
        assert_eq!(b.last(), Point::new(0.0, 0.0));
        // On/over the radius: accepted
        assert!(b.add(Point::new(8.0, 0.0)));
        assert_eq!(b.last(), Point::new(8.0, 0.0));
    }

    #[test]
    fn test_finish_appends_closing_line() {
        let b = PathBuilder::start(Point::new(1.0, 2.0), 8.0);
        let path = b.finish();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(1.0, 2.0)),
                PathEl::LineTo(Point::new(1.0, 2.0)),
            ]
        );
    }

    #[test]
    fn test_trace_grows_and_resets() {
        let mut t = TracePath::new();
        assert!(t.is_empty());

        t.restart(Point::new(0.0, 0.0));
        t.line_to(Point::new(1.0, 0.0));
        t.line_to(Point::new(1.0, 1.0));
        assert_eq!(t.elements().len(), 3);

        t.restart(Point::new(5.0, 5.0));
        assert_eq!(t.elements(), &[PathEl::MoveTo(Point::new(5.0, 5.0))]);
    }
}
