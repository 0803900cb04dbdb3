//! Quiggle - one stroke's life as an animated symmetric shape
//!
//! A quiggle starts as a raw stroke (`Drawing`), and on stroke end resolves
//! the rotational symmetry its curve was reaching for (`Completing`): the
//! closing angle is snapped to the nearest star angle, the regular-polygon
//! vertices and radii are derived, and the motion animations start. Repeated
//! `update` calls then trace the symmetric copies one segment at a time
//! until every copy is revealed (`Complete`). The motion animations keep
//! running indefinitely after that.
//!
//! Illegal states are unrepresentable: radii, vertex counts and animations
//! only exist once the stroke has finished, inside [`Phase::Done`].

use std::f64::consts::TAU;

use rand::Rng;

use crate::anim::{Animated, Easing};
use crate::config::CoreConfig;
use crate::geometry::{Point, Transform, Viewport};
use crate::path::{Path, PathBuilder, TracePath};
use crate::render::{Hsv, Replication, ShapeFrame};
use crate::symmetry::SymmetryTable;

/// Lifecycle state of a quiggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Accepting input points
    Drawing,
    /// Symmetry resolved, reveal animation in progress
    Completing,
    /// All copies revealed; motion animations continue
    Complete,
}

#[derive(Clone, Debug)]
enum Phase {
    Drawing(PathBuilder),
    Done(Box<DoneState>),
}

/// Everything that only exists once the stroke has finished
#[derive(Clone, Debug)]
struct DoneState {
    complete: bool,
    full_path: Path,
    partial: TracePath,
    reveal_index: usize,
    /// Fully revealed copies of the stroke so far
    num_paths: usize,
    num_vertices: u32,
    ideal_angle: f64,
    centroid: Point,
    outer_radius: f64,
    inner_radius: f64,
    center: Animated<Point>,
    scale: Animated<f64>,
    rotation: Animated<f64>,
    brightness: Animated<f64>,
    visibility: Animated<f64>,
}

/// A user-drawn stroke turned animated rotationally-symmetric shape
#[derive(Clone, Debug)]
pub struct Quiggle {
    points: Vec<Point>,
    hue: f64,
    phase: Phase,
}

impl Quiggle {
    /// Begin a stroke at `point`
    ///
    /// The hue is drawn once here and stays fixed for the shape's lifetime.
    pub fn start<R: Rng>(point: Point, config: &CoreConfig, rng: &mut R) -> Self {
        Self {
            points: vec![point],
            hue: rng.gen_range(0.0..360.0),
            phase: Phase::Drawing(PathBuilder::start(point, config.min_point_spacing)),
        }
    }

    /// Feed the next input point
    ///
    /// # Panics
    /// Panics if the stroke has already finished.
    pub fn add_point(&mut self, point: Point) {
        let Phase::Drawing(builder) = &mut self.phase else {
            panic!("add_point on a finished quiggle");
        };
        if builder.add(point) {
            self.points.push(point);
        }
    }

    /// End the stroke and resolve its symmetry
    ///
    /// Returns `None` (discarding the shape) when fewer than
    /// `config.min_stroke_points` points were accepted, and always for
    /// strokes of fewer than two points; that is expected input, not an
    /// error. Otherwise the quiggle enters `Completing` with
    /// its reveal started and its motion animations running from `now`.
    pub fn finish<R: Rng>(
        mut self,
        table: &SymmetryTable,
        viewport: Viewport,
        config: &CoreConfig,
        rng: &mut R,
        now: f64,
    ) -> Option<Quiggle> {
        let Phase::Drawing(builder) = self.phase else {
            panic!("finish on a finished quiggle");
        };
        // Two points minimum regardless of config: the closing angle needs
        // an opening and a closing segment
        if self.points.len() < config.min_stroke_points.max(2) {
            return None;
        }
        let full_path = builder.finish();

        let n = self.points.len();
        let raw_angle = (self.points[n - 2].direction(self.points[n - 1])
            - self.points[0].direction(self.points[1]))
        .abs();
        let (ideal_angle, num_vertices) = table.snap(raw_angle);

        let centroid = centroid_of(&vertices(&self.points, num_vertices, ideal_angle));
        let distances = self.points.iter().map(|p| p.distance(centroid));
        let outer_radius = distances.clone().fold(f64::MIN, f64::max);
        let inner_radius = distances.fold(f64::MAX, f64::min);

        let rotation_period =
            rng.gen_range(config.rotation_period_min..config.rotation_period_max);
        let jitter = rng.gen_range(config.scale_jitter_min..config.scale_jitter_max);

        // Shrink just enough to fit when the stroke overflows half the
        // viewport height, jittered so tiled shapes don't look stamped
        let half_height = viewport.height / 2.0;
        let target_scale = if half_height < outer_radius {
            jitter * half_height / outer_radius
        } else {
            1.0
        };

        // Reveal bootstrap: the trace starts at the first point without
        // counting a completed copy
        let mut partial = TracePath::new();
        partial.restart(self.points[0]);

        self.phase = Phase::Done(Box::new(DoneState {
            complete: false,
            full_path,
            partial,
            reveal_index: 1 % n,
            num_paths: 0,
            num_vertices,
            ideal_angle,
            centroid,
            outer_radius,
            inner_radius,
            center: Animated::new(
                centroid,
                viewport.center(),
                config.transition_period,
                Easing::Smooth,
                now,
            ),
            scale: Animated::new(
                1.0,
                target_scale,
                config.transition_period,
                Easing::Smooth,
                now,
            ),
            rotation: Animated::new(0.0, TAU, rotation_period, Easing::Ramp, now),
            brightness: Animated::still(1.0),
            visibility: Animated::still(1.0),
        }));
        Some(self)
    }

    /// Advance the reveal by one segment
    ///
    /// No-op unless the quiggle is `Completing`. The reveal index cycles
    /// through the stroke points; each wrap finishes one symmetric copy,
    /// and finishing the `num_vertices`-th copy completes the shape.
    pub fn update(&mut self) {
        let Phase::Done(d) = &mut self.phase else {
            return;
        };
        if d.complete {
            return;
        }
        let p = self.points[d.reveal_index];
        if d.reveal_index == 0 {
            d.num_paths += 1;
            d.partial.restart(p);
            if d.num_paths as u32 == d.num_vertices {
                d.complete = true;
            }
        } else {
            d.partial.line_to(p);
        }
        d.reveal_index = (d.reveal_index + 1) % self.points.len();
    }

    pub fn state(&self) -> State {
        match &self.phase {
            Phase::Drawing(_) => State::Drawing,
            Phase::Done(d) if d.complete => State::Complete,
            Phase::Done(_) => State::Completing,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Vertex count of the resolved symmetry; `None` while drawing
    pub fn num_vertices(&self) -> Option<u32> {
        self.done().map(|d| d.num_vertices)
    }

    /// Symmetric copies fully revealed so far; `None` while drawing
    pub fn num_paths(&self) -> Option<usize> {
        self.done().map(|d| d.num_paths)
    }

    pub fn ideal_angle(&self) -> Option<f64> {
        self.done().map(|d| d.ideal_angle)
    }

    pub fn outer_radius(&self) -> Option<f64> {
        self.done().map(|d| d.outer_radius)
    }

    pub fn inner_radius(&self) -> Option<f64> {
        self.done().map(|d| d.inner_radius)
    }

    pub fn rotation_period(&self) -> Option<f64> {
        self.done().map(|d| d.rotation.period())
    }

    /// Draw-time parameters for the current instant
    ///
    /// Returns `None` when the shape contributes nothing (brightness times
    /// visibility is zero), so the renderer may skip it entirely. The
    /// partial trace is rendered under the replication's accumulated steps
    /// (see [`Replication::partial_transform`]), so the reveal progressively
    /// traces each next copy around the ring.
    pub fn frame(&self, now: f64) -> Option<ShapeFrame<'_>> {
        let first = self.points[0];
        let last = *self.points.last().unwrap_or(&first);
        match &self.phase {
            Phase::Drawing(builder) => Some(ShapeFrame {
                transform: Transform::IDENTITY,
                color: Hsv::new(self.hue, 1.0, 1.0),
                full_path: builder.elements(),
                replication: Replication {
                    repeats: 1,
                    step: Point::ORIGIN,
                    pivot: first,
                    angle: 0.0,
                },
                partial: &[],
            }),
            Phase::Done(d) => {
                let value = (d.brightness.value(now) * d.visibility.value(now)).clamp(0.0, 1.0);
                if value == 0.0 {
                    return None;
                }
                let transform = Transform::scale_about(d.centroid, d.scale.value(now))
                    .then(Transform::rotation_about(d.centroid, d.rotation.value(now)))
                    .then(Transform::translation(d.center.value(now) - d.centroid));
                Some(ShapeFrame {
                    transform,
                    color: Hsv::new(self.hue, 1.0, value),
                    full_path: d.full_path.elements(),
                    replication: Replication {
                        repeats: d.num_paths + 1,
                        step: last - first,
                        pivot: first,
                        angle: d.ideal_angle,
                    },
                    partial: d.partial.elements(),
                })
            }
        }
    }

    /// Cheap circular selection test against the animated center and scale
    ///
    /// Intentionally conservative: accepts anything inside the shape's
    /// bounding circle. Always `false` while still drawing.
    pub fn hit_test(&self, point: Point, now: f64) -> bool {
        match &self.phase {
            Phase::Drawing(_) => false,
            Phase::Done(d) => {
                point.distance(d.center.value(now)) <= d.scale.value(now) * d.outer_radius
            }
        }
    }

    /// Retarget the shape toward a new center with a given radius budget
    ///
    /// `radius` is the space the layout grants the shape; the scale target
    /// becomes `radius / outer_radius` so the shape fills its cell. Both
    /// animations restart from their current values, so a shape already in
    /// motion glides to the new slot without snapping.
    ///
    /// # Panics
    /// Panics if the stroke has not finished.
    pub fn set_position(&mut self, center: Point, radius: f64, period: f64, now: f64) {
        let d = self.done_mut("set_position");
        d.center = d.center.change(center, period, now);
        d.scale = d.scale.change(radius / d.outer_radius, period, now);
    }

    /// Retarget brightness (HSV value multiplier)
    pub fn set_brightness(&mut self, brightness: f64, period: f64, now: f64) {
        let d = self.done_mut("set_brightness");
        d.brightness = d.brightness.change(brightness, period, now);
    }

    /// Fade the shape in or out
    pub fn set_visibility(&mut self, visible: bool, period: f64, now: f64) {
        let d = self.done_mut("set_visibility");
        let target = if visible { 1.0 } else { 0.0 };
        d.visibility = d.visibility.change(target, period, now);
    }

    /// A clone with its animations re-based to start at time zero
    ///
    /// The entry/positioning transitions are frozen at the requested export
    /// placement and the rotation replays from zero, so an export path can
    /// drive the clone deterministically frame-by-frame with synthetic
    /// timestamps instead of wall-clock time.
    ///
    /// # Panics
    /// Panics if the stroke has not finished.
    pub fn export_clone(&self, center: Point, radius: f64, now: f64) -> Quiggle {
        let Phase::Done(d) = &self.phase else {
            panic!("export_clone on an unfinished quiggle");
        };
        let mut exported = d.clone();
        exported.center = Animated::still(center);
        exported.scale = Animated::still(radius / d.outer_radius);
        exported.rotation = d.rotation.rebased(0.0);
        exported.brightness = Animated::still(d.brightness.value(now));
        exported.visibility = Animated::still(d.visibility.value(now));
        Quiggle {
            points: self.points.clone(),
            hue: self.hue,
            phase: Phase::Done(exported),
        }
    }

    fn done(&self) -> Option<&DoneState> {
        match &self.phase {
            Phase::Drawing(_) => None,
            Phase::Done(d) => Some(d),
        }
    }

    fn done_mut(&mut self, op: &str) -> &mut DoneState {
        match &mut self.phase {
            Phase::Drawing(_) => panic!("{op} on an unfinished quiggle"),
            Phase::Done(d) => d,
        }
    }
}

/// The inferred regular-polygon vertices
///
/// Starting from the first stroke point, repeatedly step along the
/// first-to-last chord rotated by successive multiples of the ideal angle.
fn vertices(points: &[Point], num_vertices: u32, ideal_angle: f64) -> Vec<Point> {
    let first = points[0];
    let last = *points.last().expect("vertices of an empty stroke");
    let dist = first.distance(last);
    let angle = first.direction(last);
    let mut result = vec![first];
    for i in 1..num_vertices {
        let prev = *result.last().expect("result starts non-empty");
        result.push(prev.point_in_direction(f64::from(i - 1) * ideal_angle + angle, dist));
    }
    result
}

fn centroid_of(vertices: &[Point]) -> Point {
    let sum = vertices
        .iter()
        .fold(Point::ORIGIN, |acc, v| acc + *v);
    sum / vertices.len() as f64
}
