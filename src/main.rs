//! quiggle-demo - headless driver for the quiggle core
//!
//! Simulates a couple of strokes, lets the reveal run, and prints the
//! per-frame parameters an actual renderer would consume. Useful for
//! eyeballing the engine's output without a graphics stack.

use std::f64::consts::TAU;

use quiggle_core::{Drawing, Point, State, Viewport};

const FPS: u32 = 24;

fn main() {
    env_logger::init();
    log::info!("Starting quiggle demo");

    let viewport = Viewport::new(1000.0, 1000.0);
    let mut drawing = Drawing::with_seed(viewport, 7);

    // Two wobbly near-closed strokes, offset from each other
    wobbly_stroke(&mut drawing, Point::new(400.0, 400.0), 120.0);
    drawing.end_stroke(0.0);
    wobbly_stroke(&mut drawing, Point::new(650.0, 600.0), 90.0);
    drawing.end_stroke(0.5);

    // Let every reveal run to completion
    while drawing
        .quiggles()
        .iter()
        .any(|q| q.state() == State::Completing)
    {
        drawing.update();
    }

    let duration = drawing.loop_duration(FPS);
    let frames = (duration * f64::from(FPS)).round() as u32;
    log::info!("scene loops in {:.2}s ({} frames)", duration, frames);

    let export = drawing.export_scene(viewport, 10.0);
    for i in 0..frames {
        let now = f64::from(i) / f64::from(FPS);
        for (shape, frame) in export.frames(now).iter().enumerate() {
            let [a, b, c, d, e, f] = frame.transform.coeffs();
            let (r, g, bl) = frame.color.to_rgb();
            println!(
                "frame {i:3} shape {shape}: rgb({r:3},{g:3},{bl:3}) \
                 transform [{a:7.3} {b:7.3} {c:7.3} {d:7.3} {e:8.2} {f:8.2}] \
                 copies {}",
                frame.replication.repeats
            );
        }
    }
}

/// Trace a rough, slightly noisy loop that closes about 4/5 of a turn
fn wobbly_stroke(drawing: &mut Drawing, center: Point, radius: f64) {
    let steps = 40;
    let sweep = TAU * 0.8;
    let start = center + Point::new(radius, 0.0);
    drawing.start_stroke(start);
    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        let angle = t * sweep;
        let wobble = 1.0 + 0.08 * (angle * 5.0).sin();
        let p = center + Point::new(angle.cos(), angle.sin()) * (radius * wobble);
        drawing.extend_stroke(p);
    }
}
