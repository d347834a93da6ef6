//! Error types for the geocell library.

use thiserror::Error;

/// Errors that can occur when encoding or decoding spatial cells.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocellError {
    /// Latitude is outside [-90, 90].
    #[error("Invalid latitude: {lat} (must be between -90 and 90)")]
    InvalidLatitude { lat: f64 },

    /// Longitude is outside [-180, 180].
    #[error("Invalid longitude: {lon} (must be between -180 and 180)")]
    InvalidLongitude { lon: f64 },

    /// Precision is outside [1, 12].
    #[error("Invalid precision: {precision} (must be between 1 and 12)")]
    InvalidPrecision { precision: usize },

    /// The cell string has zero length.
    #[error("Cell string cannot be empty")]
    EmptyInput,

    /// The cell string contains a symbol outside the base32 alphabet.
    #[error("Invalid character {character:?} at position {position} in cell string")]
    InvalidCharacter { character: char, position: usize },

    /// A GeoJSON position has fewer than two elements.
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },
}

/// Result type alias using [`GeocellError`].
pub type Result<T> = std::result::Result<T, GeocellError>;
