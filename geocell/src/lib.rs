//! # geocell - Geohash Spatial Cells
//!
//! Bit-precise encoding of geographic coordinates into short, sortable,
//! prefix-hierarchical strings ("cells"), and back.
//!
//! ## Features
//!
//! - **Exact**: bit-for-bit compatible with standard geohash strings
//! - **Pure**: every operation is a stateless function, safe from any thread
//! - **Adjacency**: up to 8 neighbors per cell, no wrap-around
//! - **Distance**: haversine distance between cell centers
//! - **Caching**: optional [`CellService`] memoizes encodings behind an LRU cache
//!
//! ## Quick Start
//!
//! ```
//! use geocell::{bounding_box, decode, distance, encode, neighbors, precision_for_radius};
//!
//! let cell = encode(48.1351, 11.5820, 8)?;
//! assert_eq!(cell, "u281zd9z");
//!
//! let center = decode(&cell)?;
//! let bbox = bounding_box(&cell)?;
//! assert!(bbox.contains(center.lat, center.lon));
//!
//! assert!(neighbors(&cell)?.len() <= 8);
//! assert!((distance(&cell, "u33db3gz")? - 504.0).abs() < 10.0);
//! assert_eq!(precision_for_radius(39.0), 4);
//! # Ok::<(), geocell::GeocellError>(())
//! ```
//!
//! ## Cell Format
//!
//! Cells use the 32-symbol alphabet `0123456789bcdefghjkmnpqrstuvwxyz`.
//! Each character carries 5 bits, interleaved between longitude and latitude
//! starting with longitude. A cell of length `n` covers the region of every
//! longer cell it prefixes.

pub mod alphabet;
pub mod codec;
pub mod distance;
pub mod error;
pub mod neighbors;
pub mod precision;
pub mod service;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use alphabet::{ALPHABET, DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
pub use codec::{bounding_box, decode, encode, encode_default, BoundingBox, Coordinate};
pub use distance::{distance, haversine_km, EARTH_RADIUS_KM};
pub use error::{GeocellError, Result};
pub use neighbors::{neighbor, neighbors, neighbors_by_direction, Direction};
pub use precision::{cell_size_km, precision_for_radius, PRECISION_TABLE};
pub use service::{CacheStats, CellService, CellServiceBuilder};
