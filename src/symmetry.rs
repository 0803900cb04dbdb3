//! Symmetry resolver - snaps a rough closing angle to an ideal star angle
//!
//! A finished stroke implies an angle: how far the hand rotated between the
//! opening and closing segments. This module snaps that raw angle to the
//! nearest "valid" rotational symmetry, i.e. 2π·k/n for coprime (k, n) with
//! n between 3 and 9. Restricting to low-order star polygons keeps the
//! inferred shapes visually recognizable.

use once_cell::sync::Lazy;

/// Vertex counts considered by the resolver
const MIN_VERTICES: u32 = 3;
const MAX_VERTICES: u32 = 9;

static SHARED: Lazy<SymmetryTable> = Lazy::new(SymmetryTable::new);

/// Precomputed map from symmetry angle to vertex count, sorted by angle
#[derive(Clone, Debug)]
pub struct SymmetryTable {
    /// (angle, vertex count) pairs, ascending by angle
    entries: Vec<(f64, u32)>,
}

impl SymmetryTable {
    /// Build the table from all coprime pairs (k, n), n in [3, 9], k in [1, n)
    pub fn new() -> Self {
        let mut entries = Vec::new();
        for n in MIN_VERTICES..=MAX_VERTICES {
            for k in 1..n {
                if gcd(n, k) == 1 {
                    let angle = 2.0 * std::f64::consts::PI * f64::from(k) / f64::from(n);
                    entries.push((angle, n));
                }
            }
        }
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { entries }
    }

    /// The process-wide shared table
    pub fn shared() -> &'static SymmetryTable {
        &SHARED
    }

    /// Snap a raw angle to the nearest representable symmetry
    ///
    /// Returns `(ideal_angle, vertex_count)`. An exact key wins outright;
    /// otherwise the nearer of the two bracketing keys is chosen, and when
    /// both are equidistant the lower key wins.
    pub fn snap(&self, angle: f64) -> (f64, u32) {
        assert!(!self.entries.is_empty(), "symmetry table is empty");

        match self
            .entries
            .binary_search_by(|(a, _)| a.total_cmp(&angle))
        {
            Ok(i) => self.entries[i],
            Err(i) => {
                // i is the insertion point: entries[i - 1] < angle < entries[i]
                let lower = i.checked_sub(1).map(|j| self.entries[j]);
                let upper = self.entries.get(i).copied();
                match (lower, upper) {
                    (Some(lo), Some(hi)) => {
                        // Lower key wins ties
                        if (angle - lo.0).abs() <= (hi.0 - angle).abs() {
                            lo
                        } else {
                            hi
                        }
                    }
                    (Some(lo), None) => lo,
                    (None, Some(hi)) => hi,
                    (None, None) => unreachable!("table checked non-empty"),
                }
            }
        }
    }

    /// All (angle, vertex count) entries, ascending by angle
    pub fn entries(&self) -> &[(f64, u32)] {
        &self.entries
    }
}

impl Default for SymmetryTable {
    fn default() -> Self {
        Self::new()
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
