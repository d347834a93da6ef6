//! Geocell Service - HTTP microservice for geohash cell queries.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEOCELL_PRECISION` | Precision used by `/encode` when none is given | 8 |
//! | `GEOCELL_CACHE_SIZE` | Maximum cached encodings | 10000 |
//! | `GEOCELL_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /encode?lat=X&lon=Y[&precision=P]` - Encode a coordinate
//! - `GET /decode?cell=C` - Cell center
//! - `GET /bounds?cell=C` - Cell bounding box
//! - `GET /neighbors?cell=C` - Adjacent cells
//! - `GET /distance?a=C&b=D` - Distance between cell centers in km
//! - `GET /precision?radius_km=R` - Precision suited to a search radius
//! - `GET /health` - Health check
//! - `GET /stats` - Cache statistics
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use geocell::CellServiceBuilder;
use geocell_service::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocell_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("GEOCELL_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // The library handles GEOCELL_PRECISION and GEOCELL_CACHE_SIZE
    let cell_service = CellServiceBuilder::from_env().build()?;

    tracing::info!(
        default_precision = cell_service.default_precision(),
        cache_capacity = cell_service.cache_capacity(),
        port = port,
        "Starting geocell service"
    );

    let state = Arc::new(AppState { cell_service });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
