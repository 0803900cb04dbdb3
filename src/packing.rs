//! Packing table - spatial arrangements for N simultaneous shapes
//!
//! A `Packing` is a list of centers in abstract grid units (neighbouring
//! cells are two units apart, the bounding box is padded by one unit per
//! side, so a unit circle at each center just fits). The catalog is
//! hand-authored as little ascii grids; a grid containing `"o o"` uses the
//! tighter hex spacing to approximate close packing, and a `* <degrees>`
//! suffix pre-rotates the parsed arrangement.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::geometry::Point;

/// Hand-authored grid catalog, one blank-line-separated block per packing
///
/// Counts must be non-decreasing and grow by at most one between blocks;
/// `PackingTable::from_catalog` enforces this at build time.
const CATALOG: &str = "
o

o
o

 o
o o

oo
oo

oo
oo * 45

 o
ooo * 45
 o

 o o
o   o  * 90
 o o

  o
 o o
o o o

oo
oo
oo

 o o
o o o  * 90
 o o

o o o
 o o   * 90
o o o

oo
oo
oo
oo

   o
  o o
 o   o
o o o o

  o
 o o
o o o
 o o
  o

ooo
ooo
ooo

ooo
ooo * 45
ooo

   o
  o o
 o o o
o o o o

 o o o
o o o o  * 90
 o o o

o o o o
 o o o   * 90
o o o o

   o
o o o o
 o   o
o o o o
   o

  o o
 o o o
o o o o
 o o o

ooo
ooo
ooo
ooo

   o
o o o o
 o o o
o o o o
   o

 o o o o
o o o o o * 90
 o o o o

  o o
 o o o
o o o o
 o o o
  o o

ooo
ooo
ooo
ooo
ooo

oooo
oooo
oooo
oooo
";

static SHARED: Lazy<PackingTable> =
    Lazy::new(|| PackingTable::new().expect("packing catalog is malformed"));

/// Errors raised while building the packing catalog
///
/// These are configuration errors: the catalog is compiled in, so any of
/// them is fatal at startup, never at runtime.
#[derive(Debug, Error)]
pub enum PackingError {
    #[error("empty grid block in packing catalog")]
    EmptyGrid,
    #[error("invalid rotation suffix {text:?} in packing catalog")]
    BadRotation { text: String },
    #[error("packing with {found} centers registered after maximum {max}; counts may grow by at most one")]
    NonContiguous { found: usize, max: usize },
}

/// An immutable arrangement of N centers with its derived bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct Packing {
    centers: Vec<Point>,
    min: Point,
    max: Point,
}

impl Packing {
    /// Build a packing from its centers
    ///
    /// # Panics
    /// Panics if `centers` is empty.
    pub fn new(centers: Vec<Point>) -> Self {
        assert!(!centers.is_empty(), "packing requires at least one center");
        let mut min = centers[0];
        let mut max = centers[0];
        for c in &centers {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        // Pad one unit per side so edge shapes get breathing room
        Self {
            centers,
            min: min - Point::new(1.0, 1.0),
            max: max + Point::new(1.0, 1.0),
        }
    }

    /// Number of shapes this arrangement positions
    pub fn n(&self) -> usize {
        self.centers.len()
    }

    /// The centers, in registration order
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Center of the padded bounding box
    pub fn box_center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Largest uniform scale that fits the padded box into a viewport
    pub fn scale_to_fit(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        (viewport_width / self.width()).min(viewport_height / self.height())
    }

    /// A new packing with every center rotated about the origin
    pub fn rotate(&self, degrees: f64) -> Packing {
        let angle = degrees.to_radians();
        Packing::new(
            self.centers
                .iter()
                .map(|c| c.rotated_about(Point::ORIGIN, angle))
                .collect(),
        )
    }
}

/// Parse a single ascii grid block into a packing
///
/// Each `o` becomes a center. A block containing `"o o"` is a hex layout
/// and keeps the raw column as x with rows √3 apart; all other blocks use
/// square spacing with two units between neighbouring cells.
pub fn grid(block: &str) -> Result<Packing, PackingError> {
    let hex = block.contains("o o");
    let mut centers = Vec::new();
    for (row, line) in block.lines().enumerate() {
        for (col, c) in line.chars().enumerate() {
            if c == 'o' {
                centers.push(if hex {
                    Point::new(col as f64, row as f64 * 3.0_f64.sqrt())
                } else {
                    Point::new(col as f64 * 2.0, row as f64 * 2.0)
                });
            }
        }
    }
    if centers.is_empty() {
        return Err(PackingError::EmptyGrid);
    }
    Ok(Packing::new(centers))
}

/// Static catalog mapping shape count to its arrangements
#[derive(Clone, Debug)]
pub struct PackingTable {
    by_count: HashMap<usize, Vec<Packing>>,
    max_count: usize,
}

impl PackingTable {
    /// Build the table from the built-in catalog
    pub fn new() -> Result<Self, PackingError> {
        Self::from_catalog(CATALOG)
    }

    /// The process-wide shared table
    ///
    /// Panics on first access if the built-in catalog is malformed, which
    /// is a programming error caught by the test suite.
    pub fn shared() -> &'static PackingTable {
        &SHARED
    }

    /// Build a table from a catalog string
    pub fn from_catalog(catalog: &str) -> Result<Self, PackingError> {
        let mut by_count: HashMap<usize, Vec<Packing>> = HashMap::new();
        let mut max_count = 0usize;

        for block in catalog.split("\n\n") {
            let block = block.trim_matches('\n');
            if block.trim().is_empty() {
                continue;
            }
            let (cells, rotation) = split_rotation(block)?;
            let mut packing = grid(&cells)?;
            if let Some(degrees) = rotation {
                packing = packing.rotate(degrees);
            }

            let n = packing.n();
            if n != max_count && n != max_count + 1 {
                return Err(PackingError::NonContiguous {
                    found: n,
                    max: max_count,
                });
            }
            max_count = max_count.max(n);
            by_count.entry(n).or_default().push(packing);
        }

        Ok(Self {
            by_count,
            max_count,
        })
    }

    /// Largest shape count with a registered arrangement
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// All registered arrangements for a shape count
    pub fn variants(&self, n: usize) -> &[Packing] {
        self.by_count.get(&n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The arrangement used for `n` simultaneous shapes
    ///
    /// Selection is deterministic: always the first registered variant.
    ///
    /// # Panics
    /// Panics if no arrangement is registered for `n`; asking for one is a
    /// caller contract breach, not a recoverable condition.
    pub fn packing_for(&self, n: usize) -> &Packing {
        self.by_count
            .get(&n)
            .and_then(|v| v.first())
            .unwrap_or_else(|| panic!("no packing registered for {n} shapes (max {})", self.max_count))
    }
}

/// Split a grid block into its cell text and optional `* degrees` suffix
fn split_rotation(block: &str) -> Result<(String, Option<f64>), PackingError> {
    let mut rotation = None;
    let mut cells = String::new();
    for line in block.lines() {
        if let Some(star) = line.find('*') {
            let text = line[star + 1..].trim();
            let degrees: f64 = text
                .parse()
                .map_err(|_| PackingError::BadRotation {
                    text: text.to_string(),
                })?;
            rotation = Some(degrees);
            cells.push_str(line[..star].trim_end());
        } else {
            cells.push_str(line);
        }
        cells.push('\n');
    }
    Ok((cells, rotation))
}
