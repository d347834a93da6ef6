//! Geohash encoding and decoding.
//!
//! This module converts between coordinates and cell strings, and recovers the
//! rectangular region ([`BoundingBox`]) a cell string stands for.
//!
//! # Bit Layout
//!
//! A cell of precision `p` carries `5 * p` bits. Bits alternate between the
//! longitude and latitude axes, **starting with longitude**. Each bit halves
//! the active range:
//!
//! - `1` keeps the upper half (lower bound moves to the midpoint)
//! - `0` keeps the lower half (upper bound moves to the midpoint)
//!
//! When encoding, a coordinate exactly on a midpoint goes to the lower half.
//! Existing cell strings depend on this, so it must not change.

use std::fmt;

use crate::alphabet::{
    symbol, symbol_value, validate_coordinate, validate_precision, BITS_PER_CHAR, DEFAULT_PRECISION,
};
use crate::error::{GeocellError, Result};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
}

impl Coordinate {
    /// Create a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeocellError::InvalidLatitude`] or [`GeocellError::InvalidLongitude`]
    /// if the values are out of range.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        validate_coordinate(lat, lon)?;
        Ok(Self { lat, lon })
    }

    /// Encode this coordinate at the given precision.
    pub fn encode(&self, precision: usize) -> Result<String> {
        encode(self.lat, self.lon, precision)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// The rectangular lat/lon region represented by a cell string.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Southern boundary latitude.
    pub min_lat: f64,
    /// Northern boundary latitude.
    pub max_lat: f64,
    /// Western boundary longitude.
    pub min_lon: f64,
    /// Eastern boundary longitude.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Midpoint of the region.
    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check whether a point lies inside the region (edges included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// A closed interval being bisected along one axis.
#[derive(Debug, Clone, Copy)]
struct Range {
    lo: f64,
    hi: f64,
}

impl Range {
    const LAT: Range = Range { lo: -90.0, hi: 90.0 };
    const LON: Range = Range {
        lo: -180.0,
        hi: 180.0,
    };

    fn mid(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    /// Keep the upper half when `bit` is set, the lower half otherwise.
    fn narrow(&mut self, bit: bool) {
        let mid = self.mid();
        if bit {
            self.lo = mid;
        } else {
            self.hi = mid;
        }
    }
}

/// Encode a coordinate into a cell string.
///
/// # Arguments
///
/// * `lat` - Latitude in decimal degrees (-90 to 90)
/// * `lon` - Longitude in decimal degrees (-180 to 180)
/// * `precision` - Length of the resulting string (1 to 12)
///
/// # Errors
///
/// Returns an error if any argument is out of range. Validation happens before
/// any computation, in the order latitude, longitude, precision.
///
/// # Examples
///
/// ```
/// use geocell::encode;
///
/// assert_eq!(encode(48.1351, 11.5820, 8).unwrap(), "u281zd9z"); // Munich
/// assert_eq!(encode(52.52, 13.405, 5).unwrap(), "u33dc"); // Berlin
/// ```
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String> {
    validate_coordinate(lat, lon)?;
    validate_precision(precision)?;

    let mut lat_range = Range::LAT;
    let mut lon_range = Range::LON;
    let mut even = true;

    let mut cell = String::with_capacity(precision);
    for _ in 0..precision {
        let mut ch: u8 = 0;
        for _ in 0..BITS_PER_CHAR {
            let (range, value) = if even {
                (&mut lon_range, lon)
            } else {
                (&mut lat_range, lat)
            };
            // Strictly greater: a value on the midpoint belongs to the lower half
            let bit = value > range.mid();
            range.narrow(bit);
            ch = (ch << 1) | bit as u8;
            even = !even;
        }
        cell.push(symbol(ch));
    }

    Ok(cell)
}

/// Encode a coordinate with [`DEFAULT_PRECISION`] (8 characters, ~±19 m).
pub fn encode_default(lat: f64, lon: f64) -> Result<String> {
    encode(lat, lon, DEFAULT_PRECISION)
}

/// Decode a cell string to the center of its region.
///
/// # Errors
///
/// Returns [`GeocellError::EmptyInput`] for an empty string and
/// [`GeocellError::InvalidCharacter`] for a symbol outside the alphabet.
///
/// # Examples
///
/// ```
/// use geocell::decode;
///
/// let center = decode("u33db3gz").unwrap();
/// assert!((center.lat - 52.5255).abs() < 1e-3);
/// assert!((center.lon - 13.3757).abs() < 1e-3);
/// ```
pub fn decode(cell: &str) -> Result<Coordinate> {
    Ok(bounding_box(cell)?.center())
}

/// Compute the region a cell string represents.
///
/// Uses the same bit walk as [`decode`] and fails under the same conditions.
/// The decoded center always lies inside the returned box.
pub fn bounding_box(cell: &str) -> Result<BoundingBox> {
    let (lat_range, lon_range) = walk(cell)?;
    Ok(BoundingBox {
        min_lat: lat_range.lo,
        max_lat: lat_range.hi,
        min_lon: lon_range.lo,
        max_lon: lon_range.hi,
    })
}

/// Replay the bits of `cell` over the full lat/lon extent.
fn walk(cell: &str) -> Result<(Range, Range)> {
    if cell.is_empty() {
        return Err(GeocellError::EmptyInput);
    }

    let mut lat_range = Range::LAT;
    let mut lon_range = Range::LON;
    let mut even = true;

    for (position, character) in cell.chars().enumerate() {
        let idx = symbol_value(character, position)?;

        for shift in (0..BITS_PER_CHAR).rev() {
            let bit = (idx >> shift) & 1 == 1;
            if even {
                lon_range.narrow(bit);
            } else {
                lat_range.narrow(bit);
            }
            even = !even;
        }
    }

    Ok((lat_range, lon_range))
}
