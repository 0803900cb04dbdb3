//! Drawing - the collection of live quiggles and its external boundaries
//!
//! Owns the shapes, the viewport, and the injected random source. Exposes
//! the three collaborator-facing surfaces: the input boundary
//! (`start_stroke` / `extend_stroke` / `end_stroke`), the render boundary
//! (`frames`), and the layout boundary (packing reassignment whenever the
//! live shape count changes). The export boundary produces a re-based copy
//! of the whole scene for deterministic frame-by-frame playback.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::CoreConfig;
use crate::geometry::{Point, Viewport};
use crate::packing::PackingTable;
use crate::quiggle::{Quiggle, State};
use crate::render::ShapeFrame;
use crate::symmetry::SymmetryTable;

/// A scene of quiggles sharing one viewport and layout
pub struct Drawing {
    quiggles: Vec<Quiggle>,
    viewport: Viewport,
    config: CoreConfig,
    rng: StdRng,
    symmetry: &'static SymmetryTable,
    packings: &'static PackingTable,
}

impl Drawing {
    /// Create an empty drawing with entropy-seeded randomness
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rng(viewport, StdRng::from_entropy())
    }

    /// Create an empty drawing with deterministic randomness
    pub fn with_seed(viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, rng: StdRng) -> Self {
        Self {
            quiggles: Vec::new(),
            viewport,
            config: CoreConfig::default(),
            rng,
            symmetry: SymmetryTable::shared(),
            packings: PackingTable::shared(),
        }
    }

    /// Replace the default config
    pub fn with_config(mut self, config: CoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.quiggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiggles.is_empty()
    }

    pub fn quiggles(&self) -> &[Quiggle] {
        &self.quiggles
    }

    /// Begin a new stroke
    pub fn start_stroke(&mut self, point: Point) {
        log::debug!("stroke started at ({:.1}, {:.1})", point.x, point.y);
        self.quiggles
            .push(Quiggle::start(point, &self.config, &mut self.rng));
    }

    /// Feed the next input point of the active stroke
    ///
    /// # Panics
    /// Panics if no stroke is active.
    pub fn extend_stroke(&mut self, point: Point) {
        let quiggle = self
            .quiggles
            .last_mut()
            .unwrap_or_else(|| panic!("extend_stroke without an active stroke"));
        quiggle.add_point(point);
    }

    /// End the active stroke
    ///
    /// A stroke with too few points is silently discarded. Either way the
    /// layout is reassigned for the new live shape count.
    ///
    /// # Panics
    /// Panics if no stroke is active.
    pub fn end_stroke(&mut self, now: f64) {
        let quiggle = self
            .quiggles
            .pop()
            .unwrap_or_else(|| panic!("end_stroke without an active stroke"));
        let points = quiggle.point_count();
        match quiggle.finish(
            self.symmetry,
            self.viewport,
            &self.config,
            &mut self.rng,
            now,
        ) {
            Some(finished) => {
                log::debug!(
                    "stroke finished: {} points, {} vertices",
                    points,
                    finished.num_vertices().unwrap_or(0)
                );
                self.quiggles.push(finished);
            }
            None => log::debug!("stroke discarded: only {} points", points),
        }
        self.assign_layout(now);
    }

    /// Remove a shape and reflow the layout around the survivors
    pub fn remove(&mut self, index: usize, now: f64) -> Quiggle {
        let removed = self.quiggles.remove(index);
        self.assign_layout(now);
        removed
    }

    /// Advance every shape's reveal by one segment
    pub fn update(&mut self) {
        for quiggle in &mut self.quiggles {
            quiggle.update();
        }
    }

    /// Draw-time parameters for every currently visible shape
    ///
    /// Order is stable insertion order; the caller owns z-ordering beyond
    /// that.
    pub fn frames(&self, now: f64) -> Vec<ShapeFrame<'_>> {
        self.quiggles.iter().filter_map(|q| q.frame(now)).collect()
    }

    /// Topmost shape whose bounding circle contains `point`, if any
    pub fn hit(&self, point: Point, now: f64) -> Option<usize> {
        self.quiggles
            .iter()
            .enumerate()
            .rev()
            .find(|(_, q)| q.hit_test(point, now))
            .map(|(i, _)| i)
    }

    /// Reassign each finished shape's target center and scale
    ///
    /// Looks up the packing for the current live count, scales it to the
    /// viewport, and glides every finished shape toward its assigned cell.
    /// Shapes still being drawn keep their slot reserved but stay put.
    fn assign_layout(&mut self, now: f64) {
        let n = self.quiggles.len();
        if n == 0 {
            return;
        }
        if n > self.packings.max_count() {
            log::warn!("no packing for {} shapes, keeping previous layout", n);
            return;
        }
        let packing = self.packings.packing_for(n);
        let scale = packing.scale_to_fit(self.viewport.width, self.viewport.height);
        let screen_center = self.viewport.center();
        let box_center = packing.box_center();
        log::debug!("layout reassigned: {} shapes, cell scale {:.1}", n, scale);

        let period = self.config.transition_period;
        for (cell, quiggle) in packing.centers().iter().zip(&mut self.quiggles) {
            if quiggle.state() == State::Drawing {
                continue;
            }
            let center = screen_center + (*cell - box_center) * scale;
            quiggle.set_position(center, scale, period, now);
        }
    }

    /// Seconds one loop of the finished scene takes, snapped to the frame grid
    ///
    /// The scene repeats once every shape's rotation has carried its
    /// symmetric copies onto each other, i.e. after rotation period divided
    /// by vertex count. Returns at least one frame's worth of time.
    pub fn loop_duration(&self, fps: u32) -> f64 {
        let frame = 1.0 / f64::from(fps.max(1));
        let longest = self
            .quiggles
            .iter()
            .filter(|q| q.state() != State::Drawing)
            .filter_map(|q| Some(q.rotation_period()? / f64::from(q.num_vertices()?)))
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max);
        ((longest / frame).round() * frame).max(frame)
    }

    /// A deterministic copy of the scene for frame-by-frame export
    ///
    /// Finished shapes are cloned with their animations re-based to time
    /// zero and laid out for the export viewport; unfinished strokes are
    /// left out. Drive the result with synthetic timestamps from zero to
    /// [`Drawing::loop_duration`].
    pub fn export_scene(&self, viewport: Viewport, now: f64) -> Drawing {
        let finished: Vec<&Quiggle> = self
            .quiggles
            .iter()
            .filter(|q| q.state() != State::Drawing)
            .collect();

        let mut clones = Vec::with_capacity(finished.len());
        if finished.len() > self.packings.max_count() {
            log::warn!("no packing for {} shapes, exporting empty scene", finished.len());
        } else if !finished.is_empty() {
            let packing = self.packings.packing_for(finished.len());
            let scale = packing.scale_to_fit(viewport.width, viewport.height);
            let screen_center = viewport.center();
            let box_center = packing.box_center();
            for (cell, quiggle) in packing.centers().iter().zip(finished) {
                let center = screen_center + (*cell - box_center) * scale;
                clones.push(quiggle.export_clone(center, scale, now));
            }
        }

        Drawing {
            quiggles: clones,
            viewport,
            config: self.config.clone(),
            rng: StdRng::seed_from_u64(0),
            symmetry: self.symmetry,
            packings: self.packings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn pentagon_stroke(drawing: &mut Drawing, origin: Point) {
        let a = 2.0 * PI * 2.0 / 5.0;
        let p3 = origin + Point::new(30.0, 0.0);
        drawing.start_stroke(origin);
        drawing.extend_stroke(origin + Point::new(10.0, 0.0));
        drawing.extend_stroke(origin + Point::new(20.0, 10.0));
        drawing.extend_stroke(p3);
        drawing.extend_stroke(p3.point_in_direction(a, 10.0));
    }

    fn drawing() -> Drawing {
        Drawing::with_seed(Viewport::new(1000.0, 1000.0), 7)
    }

    #[test]
    fn test_short_stroke_leaves_no_shape() {
        let mut d = drawing();
        d.start_stroke(Point::new(0.0, 0.0));
        d.extend_stroke(Point::new(10.0, 0.0));
        d.extend_stroke(Point::new(20.0, 0.0));
        d.extend_stroke(Point::new(30.0, 0.0));
        assert_eq!(d.len(), 1);
        d.end_stroke(0.0);
        assert!(d.is_empty());
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        assert_eq!(d.quiggles()[0].state(), State::Drawing);
        d.end_stroke(0.0);
        assert_eq!(d.len(), 1);
        assert_eq!(d.quiggles()[0].state(), State::Completing);
    }

    #[test]
    fn test_layout_retargets_on_second_shape() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        pentagon_stroke(&mut d, Point::new(700.0, 700.0));
        d.end_stroke(1.0);
        assert_eq!(d.len(), 2);

        // The two-shape packing stacks cells vertically: after the
        // transition both shapes sit on the vertical center line, one
        // above the other
        let now = 1.0 + d.config().transition_period + 1.0;
        let packing = PackingTable::shared().packing_for(2);
        let scale = packing.scale_to_fit(1000.0, 1000.0);
        let expected: Vec<Point> = packing
            .centers()
            .iter()
            .map(|c| Viewport::new(1000.0, 1000.0).center() + (*c - packing.box_center()) * scale)
            .collect();
        for want in expected {
            assert!(d.hit(want, now).is_some(), "no shape at its assigned cell");
        }
    }

    #[test]
    fn test_update_advances_all_reveals() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        let points = d.quiggles()[0].point_count();
        let vertices = d.quiggles()[0].num_vertices().unwrap() as usize;
        for _ in 0..points * vertices {
            d.update();
        }
        assert_eq!(d.quiggles()[0].state(), State::Complete);
    }

    #[test]
    fn test_frames_skip_nothing_by_default() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        pentagon_stroke(&mut d, Point::new(600.0, 600.0));
        assert_eq!(d.frames(0.5).len(), 2);
    }

    #[test]
    fn test_remove_reflows_layout() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        pentagon_stroke(&mut d, Point::new(700.0, 700.0));
        d.end_stroke(0.0);
        let removed = d.remove(0, 1.0);
        assert_eq!(d.len(), 1);
        assert!(removed.num_vertices().is_some());
        // The survivor glides back toward the single-shape slot: the
        // viewport center
        let now = 1.0 + d.config().transition_period + 1.0;
        assert!(d.hit(Point::new(500.0, 500.0), now).is_some());
    }

    #[test]
    fn test_loop_duration_snaps_to_frame_grid() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        let fps = 24;
        let duration = d.loop_duration(fps);
        assert!(duration > 0.0);
        let frames = duration * f64::from(fps);
        assert!((frames - frames.round()).abs() < EPS);
    }

    #[test]
    fn test_loop_duration_of_empty_scene_is_one_frame() {
        let d = drawing();
        assert!((d.loop_duration(24) - 1.0 / 24.0).abs() < EPS);
    }

    #[test]
    fn test_export_scene_is_deterministic() {
        let mut d = drawing();
        pentagon_stroke(&mut d, Point::new(100.0, 100.0));
        d.end_stroke(0.0);
        // An unfinished stroke is left out of the export
        d.start_stroke(Point::new(800.0, 100.0));

        let export = d.export_scene(Viewport::new(500.0, 500.0), 2.0);
        assert_eq!(export.len(), 1);

        let a = export.frames(0.25);
        let b = export.frames(0.25);
        assert_eq!(a[0].transform, b[0].transform);
        // Entry transition is frozen in the export copy
        let t0 = export.quiggles()[0].frame(0.0).unwrap();
        let t9 = export.quiggles()[0].frame(9.0).unwrap();
        assert_eq!(t0.color.v, t9.color.v);
    }

    #[test]
    #[should_panic(expected = "extend_stroke without an active stroke")]
    fn test_extend_without_stroke_panics() {
        let mut d = drawing();
        d.extend_stroke(Point::new(0.0, 0.0));
    }
}
