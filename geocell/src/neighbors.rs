//! Adjacent cell lookup.
//!
//! Neighbors are found by shifting the center of a cell by one cell height
//! and/or width and re-encoding at the same precision. There is no wrap-around:
//! a shifted point beyond ±90° latitude or ±180° longitude has no neighbor, and
//! that direction is left out of the result. Cells on the poles or the
//! antimeridian therefore have fewer than 8 neighbors.

use std::fmt;

use crate::codec::{bounding_box, encode, BoundingBox};
use crate::error::Result;

/// One of the eight compass directions around a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All directions, in the order [`neighbors`] reports them.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Unit offsets `(lat, lon)` in cells.
    pub fn offsets(&self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::South => (-1.0, 0.0),
            Direction::East => (0.0, 1.0),
            Direction::West => (0.0, -1.0),
            Direction::NorthEast => (1.0, 1.0),
            Direction::NorthWest => (1.0, -1.0),
            Direction::SouthEast => (-1.0, 1.0),
            Direction::SouthWest => (-1.0, -1.0),
        }
    }

    /// Short compass abbreviation (e.g. "NE").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Return the cells adjacent to `cell`, at the same precision.
///
/// Results are ordered N, S, E, W, NE, NW, SE, SW, with any direction that
/// falls off the map omitted. Callers must not assume exactly 8 entries.
///
/// # Errors
///
/// Fails only if `cell` itself is empty or malformed.
///
/// # Examples
///
/// ```
/// use geocell::neighbors;
///
/// let cells = neighbors("u281zd9z").unwrap();
/// assert_eq!(cells.len(), 8);
///
/// // Top-right corner of the map: only S, W and SW remain
/// assert_eq!(neighbors("z").unwrap(), vec!["x", "y", "w"]);
/// ```
pub fn neighbors(cell: &str) -> Result<Vec<String>> {
    let bbox = bounding_box(cell)?;
    let precision = cell.chars().count();

    Ok(Direction::ALL
        .iter()
        .filter_map(|direction| shifted(&bbox, precision, *direction))
        .collect())
}

/// Return the adjacent cell in a single direction.
///
/// Returns `Ok(None)` when the shifted point falls off the map.
pub fn neighbor(cell: &str, direction: Direction) -> Result<Option<String>> {
    let bbox = bounding_box(cell)?;
    Ok(shifted(&bbox, cell.chars().count(), direction))
}

/// Neighbors keyed by direction, for callers that need to know which is which.
pub fn neighbors_by_direction(cell: &str) -> Result<Vec<(Direction, String)>> {
    let bbox = bounding_box(cell)?;
    let precision = cell.chars().count();

    Ok(Direction::ALL
        .iter()
        .filter_map(|direction| {
            shifted(&bbox, precision, *direction).map(|neighbor| (*direction, neighbor))
        })
        .collect())
}

fn shifted(bbox: &BoundingBox, precision: usize, direction: Direction) -> Option<String> {
    let center = bbox.center();
    let (dlat, dlon) = direction.offsets();
    encode(
        center.lat + dlat * bbox.height(),
        center.lon + dlon * bbox.width(),
        precision,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocellError;

    #[test]
    fn test_interior_cell_has_eight_neighbors() {
        let cells = neighbors("u0qj5v2k").unwrap();
        assert_eq!(
            cells,
            vec![
                "u0qj5v2m", "u0qj5v27", "u0qj5v2s", "u0qj5v2h", "u0qj5v2t", "u0qj5v2j",
                "u0qj5v2e", "u0qj5v25",
            ]
        );
    }

    #[test]
    fn test_neighbors_straddling_origin() {
        // "7" touches the equator and the prime meridian from the south-west
        assert_eq!(
            neighbors("7zzzzzzz").unwrap(),
            vec![
                "ebpbpbpb", "7zzzzzzy", "kpbpbpbp", "7zzzzzzx", "s0000000", "ebpbpbp8",
                "kpbpbpbn", "7zzzzzzw",
            ]
        );
    }

    #[test]
    fn test_corner_cells_omit_directions() {
        assert_eq!(neighbors("zzzzzzzz").unwrap(), vec!["zzzzzzzy", "zzzzzzzx", "zzzzzzzw"]);
        assert_eq!(neighbors("00000000").unwrap(), vec!["00000001", "00000002", "00000003"]);
        assert_eq!(neighbors("bpbpbpbp").unwrap(), vec!["bpbpbpbn", "bpbpbpbr", "bpbpbpbq"]);
    }

    #[test]
    fn test_polar_edge_cell() {
        // "u" borders the north pole: N, NE and NW fall off the map
        assert_eq!(neighbors("u").unwrap(), vec!["s", "v", "g", "t", "e"]);
    }

    #[test]
    fn test_cardinality_and_length() {
        let cells = [
            "u281zd9z", "7", "s", "z", "0", "b", "pbpbp", "zzzz", "9q8yyk8", "dr5regw3",
            "r3gx2f7", "xn774c",
        ];
        for cell in cells {
            let result = neighbors(cell).unwrap();
            assert!(result.len() <= 8, "{} has {} neighbors", cell, result.len());
            assert!(result.iter().all(|n| n.len() == cell.len()));
            assert!(!result.iter().any(|n| n == cell));
        }
    }

    #[test]
    fn test_single_direction() {
        assert_eq!(
            neighbor("u0qj5v2k", Direction::North).unwrap(),
            Some("u0qj5v2m".to_string())
        );
        assert_eq!(
            neighbor("u0qj5v2k", Direction::SouthWest).unwrap(),
            Some("u0qj5v25".to_string())
        );
        assert_eq!(neighbor("zzzzzzzz", Direction::North).unwrap(), None);
        assert_eq!(neighbor("zzzzzzzz", Direction::East).unwrap(), None);
    }

    #[test]
    fn test_neighbors_by_direction() {
        let keyed = neighbors_by_direction("zzzzzzzz").unwrap();
        let directions: Vec<Direction> = keyed.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            directions,
            vec![Direction::South, Direction::West, Direction::SouthWest]
        );
    }

    #[test]
    fn test_cells_beyond_max_precision_have_no_neighbors() {
        // Decodes fine, but no shifted point can be re-encoded at 13 characters
        let cell = "u281zd9zmvbwx";
        assert!(crate::codec::decode(cell).is_ok());
        assert!(neighbors(cell).unwrap().is_empty());
        assert!(neighbors_by_direction(cell).unwrap().is_empty());
        assert_eq!(neighbor(cell, Direction::North).unwrap(), None);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(neighbors(""), Err(GeocellError::EmptyInput));
        assert!(matches!(
            neighbors("u0qa"),
            Err(GeocellError::InvalidCharacter { character: 'a', .. })
        ));
        assert!(neighbor("", Direction::North).is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::NorthEast.to_string(), "NE");
        assert_eq!(Direction::South.offsets(), (-1.0, 0.0));
        assert_eq!(Direction::ALL.len(), 8);
    }
}
