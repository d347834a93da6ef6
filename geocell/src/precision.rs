//! Precision selection.
//!
//! Approximate error bounds of a decoded point at each precision:
//!
//! | Precision | Error |
//! |-----------|-------|
//! | 1 | ±2500 km |
//! | 2 | ±630 km |
//! | 3 | ±78 km |
//! | 4 | ±20 km |
//! | 5 | ±2.4 km |
//! | 6 | ±610 m |
//! | 7 | ±76 m |
//! | 8 | ±19 m |
//! | 9 | ±2.4 m |
//! | 10 | ±60 cm |
//! | 11 | ±7.4 cm |
//! | 12 | ±1.9 cm |

use crate::alphabet::MAX_PRECISION;

/// Approximate equatorial cell size in kilometers, by precision (coarse to fine).
pub const PRECISION_TABLE: [(usize, f64); 12] = [
    (1, 5000.0),
    (2, 1250.0),
    (3, 156.0),
    (4, 39.0),
    (5, 4.9),
    (6, 1.2),
    (7, 0.15),
    (8, 0.038),
    (9, 0.0047),
    (10, 0.0012),
    (11, 0.00015),
    (12, 0.000037),
];

/// Pick the coarsest precision whose cell size does not exceed `radius_km`.
///
/// Scans [`PRECISION_TABLE`] from coarse to fine and returns the first
/// precision with `radius_km >= size`. Radii smaller than the finest cell
/// (and `NaN`) get precision 12.
///
/// # Examples
///
/// ```
/// use geocell::precision_for_radius;
///
/// assert_eq!(precision_for_radius(5000.0), 1);
/// assert_eq!(precision_for_radius(50.0), 4);
/// assert_eq!(precision_for_radius(0.00001), 12);
/// ```
pub fn precision_for_radius(radius_km: f64) -> usize {
    PRECISION_TABLE
        .iter()
        .find(|(_, size_km)| radius_km >= *size_km)
        .map(|(precision, _)| *precision)
        .unwrap_or(MAX_PRECISION)
}

/// Approximate equatorial cell size in kilometers for a precision.
///
/// Returns `None` for precisions outside 1 to 12.
pub fn cell_size_km(precision: usize) -> Option<f64> {
    PRECISION_TABLE
        .iter()
        .find(|(p, _)| *p == precision)
        .map(|(_, size_km)| *size_km)
}
