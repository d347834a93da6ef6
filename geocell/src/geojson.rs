//! GeoJSON cell tagging.
//!
//! This module attaches cell strings to GeoJSON features and turns cells back
//! into polygons. Enable the `geojson` feature to use this module.
//!
//! Tagged features carry the cell under [`CELL_PROPERTY`] (`"geohash"`), the
//! same name the CLI gives its CSV column. Pipelines that expect the
//! `location_geohash` metadata key should rename the property after tagging.
//!
//! # Example
//!
//! ```ignore
//! use geocell::geojson::tag_feature;
//! use geojson::Feature;
//!
//! let mut feature: Feature = r#"{
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [11.5820, 48.1351]},
//!     "properties": {"name": "Munich"}
//! }"#.parse()?;
//!
//! tag_feature(&mut feature, 8)?;
//! // properties: {"name": "Munich", "geohash": "u281zd9z"}
//! ```

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};

use crate::codec::{bounding_box, encode};
use crate::error::{GeocellError, Result};

/// Feature property that receives the cell string.
pub const CELL_PROPERTY: &str = "geohash";

/// Tag a point feature with its cell string.
///
/// Positions are read in GeoJSON order: `[longitude, latitude, ...]`.
///
/// # Returns
///
/// `true` if the feature was tagged, `false` if it has no geometry or its
/// geometry is not a `Point`.
///
/// # Errors
///
/// Returns an error if the position has fewer than 2 elements, or if the
/// coordinates or precision are out of range.
pub fn tag_feature(feature: &mut Feature, precision: usize) -> Result<bool> {
    tag_feature_with(feature, |lat, lon| encode(lat, lon, precision))
}

/// Tag a point feature using a caller-supplied encoder.
///
/// `encode_point` receives `(lat, lon)`. Use this to route encodings through
/// a [`CellService`](crate::CellService) cache:
///
/// ```ignore
/// tag_feature_with(&mut feature, |lat, lon| service.encode(lat, lon))?;
/// ```
pub fn tag_feature_with<F>(feature: &mut Feature, encode_point: F) -> Result<bool>
where
    F: FnOnce(f64, f64) -> Result<String>,
{
    let position = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(GeoJsonValue::Point(position)) => position,
        _ => return Ok(false),
    };

    let (lat, lon) = position_lat_lon(position)?;
    let cell = encode_point(lat, lon)?;
    feature.set_property(CELL_PROPERTY, cell);

    Ok(true)
}

/// Tag every point feature of a collection.
///
/// Stops at the first invalid position.
///
/// # Returns
///
/// The number of features tagged.
pub fn tag_feature_collection(
    collection: &mut FeatureCollection,
    precision: usize,
) -> Result<usize> {
    let mut tagged = 0;
    for feature in &mut collection.features {
        if tag_feature(feature, precision)? {
            tagged += 1;
        }
    }
    Ok(tagged)
}

/// Encode a GeoJSON position `[lon, lat, ...]`.
pub fn encode_position(position: &[f64], precision: usize) -> Result<String> {
    let (lat, lon) = position_lat_lon(position)?;
    encode(lat, lon, precision)
}

fn position_lat_lon(position: &[f64]) -> Result<(f64, f64)> {
    match position {
        [lon, lat, ..] => Ok((*lat, *lon)),
        _ => Err(GeocellError::InvalidCoordinate {
            message: "Position must have at least 2 elements (lon, lat)".to_string(),
        }),
    }
}

/// The region of a cell as a closed GeoJSON polygon.
///
/// The ring runs counter-clockwise from the south-west corner, in
/// `[lon, lat]` order.
pub fn cell_polygon(cell: &str) -> Result<Geometry> {
    let bbox = bounding_box(cell)?;
    let ring = vec![
        vec![bbox.min_lon, bbox.min_lat],
        vec![bbox.max_lon, bbox.min_lat],
        vec![bbox.max_lon, bbox.max_lat],
        vec![bbox.min_lon, bbox.max_lat],
        vec![bbox.min_lon, bbox.min_lat],
    ];
    Ok(Geometry::new(GeoJsonValue::Polygon(vec![ring])))
}
