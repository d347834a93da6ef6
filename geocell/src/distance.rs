//! Great-circle distance between cells.

use crate::codec::{decode, Coordinate};
use crate::error::Result;

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometers between the centers of two cells.
///
/// Cells may have different precisions. Only decoding can fail; the distance
/// itself is always a finite, non-negative number.
///
/// # Examples
///
/// ```
/// use geocell::distance;
///
/// // Munich to Berlin
/// let km = distance("u281zd9z", "u33db3gz").unwrap();
/// assert!((km - 504.0).abs() < 10.0);
/// ```
pub fn distance(cell_a: &str, cell_b: &str) -> Result<f64> {
    let a = decode(cell_a)?;
    let b = decode(cell_b)?;
    Ok(haversine_km(a, b))
}

/// Haversine distance in kilometers between two points on a sphere of
/// radius [`EARTH_RADIUS_KM`].
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
