//! HTTP request handlers for the cell service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use geocell::GeocellError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the encode endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EncodeQuery {
    /// Latitude in decimal degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in decimal degrees (-180 to 180).
    pub lon: f64,
    /// Cell length (1 to 12). Defaults to the service precision.
    pub precision: Option<usize>,
}

/// Query parameters for endpoints that take a single cell.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CellQuery {
    /// Geohash cell string.
    pub cell: String,
}

/// Query parameters for the distance endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistanceQuery {
    /// First cell.
    pub a: String,
    /// Second cell.
    pub b: String,
}

/// Query parameters for the precision endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrecisionQuery {
    /// Search radius in kilometers.
    pub radius_km: f64,
}

/// Successful encode response.
#[derive(Debug, Serialize, ToSchema)]
pub struct EncodeResponse {
    /// Encoded cell.
    pub cell: String,
    /// Latitude queried.
    pub lat: f64,
    /// Longitude queried.
    pub lon: f64,
    /// Precision used.
    pub precision: usize,
}

/// Cell center.
#[derive(Debug, Serialize, ToSchema)]
pub struct DecodeResponse {
    pub cell: String,
    pub lat: f64,
    pub lon: f64,
}

/// Cell bounding box.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoundsResponse {
    pub cell: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Adjacent cells.
#[derive(Debug, Serialize, ToSchema)]
pub struct NeighborsResponse {
    pub cell: String,
    /// Neighbors in N, S, E, W, NE, NW, SE, SW order, with off-map directions omitted.
    pub neighbors: Vec<String>,
}

/// Distance between two cell centers.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    pub a: String,
    pub b: String,
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
}

/// Suggested precision for a search radius.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrecisionResponse {
    pub radius_km: f64,
    pub precision: usize,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Cache statistics response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Number of encodings in cache.
    pub cached_cells: u64,
    /// Cache hit count.
    pub cache_hits: u64,
    /// Cache miss count.
    pub cache_misses: u64,
    /// Cache hit rate (0.0 to 1.0).
    pub hit_rate: f64,
    /// Precision used when none is given.
    pub default_precision: usize,
}

/// Encode a coordinate into a cell.
///
/// Results are served through the shared [`geocell::CellService`] cache.
#[utoipa::path(
    get,
    path = "/encode",
    tag = "cells",
    params(EncodeQuery),
    responses(
        (status = 200, description = "Cell for the coordinate", body = EncodeResponse),
        (status = 400, description = "Coordinate or precision out of range", body = ErrorResponse)
    )
)]
pub async fn get_encode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EncodeQuery>,
) -> impl IntoResponse {
    let precision = query
        .precision
        .unwrap_or_else(|| state.cell_service.default_precision());

    tracing::debug!(
        lat = query.lat,
        lon = query.lon,
        precision = precision,
        "Encode query"
    );

    match state
        .cell_service
        .encode_with_precision(query.lat, query.lon, precision)
    {
        Ok(cell) => (
            StatusCode::OK,
            Json(EncodeResponse {
                cell,
                lat: query.lat,
                lon: query.lon,
                precision,
            }),
        )
            .into_response(),
        Err(e) => error_response("encode", e),
    }
}

/// Decode a cell into its center.
#[utoipa::path(
    get,
    path = "/decode",
    tag = "cells",
    params(CellQuery),
    responses(
        (status = 200, description = "Center of the cell", body = DecodeResponse),
        (status = 400, description = "Empty or malformed cell", body = ErrorResponse)
    )
)]
pub async fn get_decode(Query(query): Query<CellQuery>) -> impl IntoResponse {
    tracing::debug!(cell = %query.cell, "Decode query");

    match geocell::decode(&query.cell) {
        Ok(center) => Json(DecodeResponse {
            cell: query.cell,
            lat: center.lat,
            lon: center.lon,
        })
        .into_response(),
        Err(e) => error_response("decode", e),
    }
}

/// Bounding box of a cell.
#[utoipa::path(
    get,
    path = "/bounds",
    tag = "cells",
    params(CellQuery),
    responses(
        (status = 200, description = "Region covered by the cell", body = BoundsResponse),
        (status = 400, description = "Empty or malformed cell", body = ErrorResponse)
    )
)]
pub async fn get_bounds(Query(query): Query<CellQuery>) -> impl IntoResponse {
    tracing::debug!(cell = %query.cell, "Bounds query");

    match geocell::bounding_box(&query.cell) {
        Ok(bbox) => Json(BoundsResponse {
            cell: query.cell,
            min_lat: bbox.min_lat,
            max_lat: bbox.max_lat,
            min_lon: bbox.min_lon,
            max_lon: bbox.max_lon,
        })
        .into_response(),
        Err(e) => error_response("bounds", e),
    }
}

/// Cells adjacent to a cell.
#[utoipa::path(
    get,
    path = "/neighbors",
    tag = "cells",
    params(CellQuery),
    responses(
        (status = 200, description = "Up to 8 adjacent cells", body = NeighborsResponse),
        (status = 400, description = "Empty or malformed cell", body = ErrorResponse)
    )
)]
pub async fn get_neighbors(Query(query): Query<CellQuery>) -> impl IntoResponse {
    tracing::debug!(cell = %query.cell, "Neighbors query");

    match geocell::neighbors(&query.cell) {
        Ok(neighbors) => Json(NeighborsResponse {
            cell: query.cell,
            neighbors,
        })
        .into_response(),
        Err(e) => error_response("neighbors", e),
    }
}

/// Haversine distance between two cell centers.
#[utoipa::path(
    get,
    path = "/distance",
    tag = "cells",
    params(DistanceQuery),
    responses(
        (status = 200, description = "Distance in kilometers", body = DistanceResponse),
        (status = 400, description = "Empty or malformed cell", body = ErrorResponse)
    )
)]
pub async fn get_distance(Query(query): Query<DistanceQuery>) -> impl IntoResponse {
    tracing::debug!(a = %query.a, b = %query.b, "Distance query");

    match geocell::distance(&query.a, &query.b) {
        Ok(distance_km) => Json(DistanceResponse {
            a: query.a,
            b: query.b,
            distance_km,
        })
        .into_response(),
        Err(e) => error_response("distance", e),
    }
}

/// Coarsest precision whose cell size does not exceed the radius.
#[utoipa::path(
    get,
    path = "/precision",
    tag = "cells",
    params(PrecisionQuery),
    responses(
        (status = 200, description = "Suggested precision", body = PrecisionResponse)
    )
)]
pub async fn get_precision(Query(query): Query<PrecisionQuery>) -> Json<PrecisionResponse> {
    Json(PrecisionResponse {
        radius_km: query.radius_km,
        precision: geocell::precision_for_radius(query.radius_km),
    })
}

/// Create an error response. Every library error is a client error.
fn error_response(operation: &str, e: GeocellError) -> axum::response::Response {
    tracing::warn!(operation = operation, error = %e, "Query failed");

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get cache statistics.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "system",
    responses((status = 200, description = "Encoding cache statistics", body = StatsResponse))
)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let stats = state.cell_service.cache_stats();

    Json(StatsResponse {
        cached_cells: stats.entry_count,
        cache_hits: stats.hit_count,
        cache_misses: stats.miss_count,
        hit_rate: stats.hit_rate(),
        default_precision: state.cell_service.default_precision(),
    })
}
