//! Geocell Service Library
//!
//! HTTP handlers, router and OpenAPI document for the geohash cell service.
//! This library is used by both the geocell-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use geocell::CellService;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Caching encoder used by `/encode`.
    pub cell_service: CellService,
}

/// OpenAPI documentation for the geocell service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geocell Service",
        version = "0.1.0",
        description = "REST API for encoding coordinates into geohash cells and querying cell geometry.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Pedro Sanz Martinez", url = "https://github.com/pedrosanzmtz/geocell")
    ),
    paths(
        handlers::get_encode,
        handlers::get_decode,
        handlers::get_bounds,
        handlers::get_neighbors,
        handlers::get_distance,
        handlers::get_precision,
        handlers::health_check,
        handlers::get_stats,
    ),
    components(
        schemas(
            handlers::EncodeResponse,
            handlers::DecodeResponse,
            handlers::BoundsResponse,
            handlers::NeighborsResponse,
            handlers::DistanceResponse,
            handlers::PrecisionResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
            handlers::StatsResponse,
        )
    ),
    tags(
        (name = "cells", description = "Cell encoding and geometry endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router, with Swagger UI mounted at `/docs`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/encode", get(handlers::get_encode))
        .route("/decode", get(handlers::get_decode))
        .route("/bounds", get(handlers::get_bounds))
        .route("/neighbors", get(handlers::get_neighbors))
        .route("/distance", get(handlers::get_distance))
        .route("/precision", get(handlers::get_precision))
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{
    BoundsResponse, DecodeResponse, DistanceResponse, EncodeResponse, ErrorResponse,
    HealthResponse, NeighborsResponse, PrecisionResponse, StatsResponse,
};
