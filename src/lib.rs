//! quiggle-core - freehand strokes turned animated symmetric shapes
//!
//! This crate provides:
//! - A path builder that smooths raw input points into a renderable curve
//! - A symmetry resolver that snaps a stroke's closing angle to the nearest
//!   low-order star polygon
//! - A generic animation engine with jump-free mid-flight retargeting
//! - A shape state machine driving the reveal and the continuous motion
//! - A packing catalog that arranges N shapes into balanced layouts
//!
//! The core computes geometry and time-based parameter values only. Input
//! capture, rasterization and frame encoding live in external collaborators
//! that feed points in and read [`render::ShapeFrame`]s out; every query
//! takes an explicit `now` timestamp, so the same scene can run against a
//! wall clock or be stepped deterministically for export.

pub mod anim;
pub mod config;
pub mod drawing;
pub mod geometry;
pub mod packing;
pub mod path;
pub mod quiggle;
pub mod render;
pub mod symmetry;

pub use anim::{Animated, Easing, Lerp, SystemClock};
pub use config::CoreConfig;
pub use drawing::Drawing;
pub use geometry::{Point, Transform, Viewport};
pub use packing::{grid, Packing, PackingError, PackingTable};
pub use path::{Path, PathBuilder, PathEl, TracePath};
pub use quiggle::{Quiggle, State};
pub use render::{Hsv, Replication, ShapeFrame};
pub use symmetry::SymmetryTable;
