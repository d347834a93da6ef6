//! Integration tests for the HTTP API.

use axum::http::StatusCode;
use axum_test::TestServer;
use geocell::CellService;
use geocell_service::{app, AppState};
use serde_json::Value;
use std::sync::Arc;

/// Create a test server around a fresh cell service.
fn create_test_server(default_precision: usize) -> TestServer {
    let cell_service = CellService::new(default_precision, 100);
    let state = Arc::new(AppState { cell_service });

    TestServer::new(app(state)).unwrap()
}

#[tokio::test]
async fn test_encode_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/encode?lat=48.1351&lon=11.5820").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["cell"], "u281zd9z");
    assert_eq!(json["lat"], 48.1351);
    assert_eq!(json["lon"], 11.582);
    assert_eq!(json["precision"], 8);
}

#[tokio::test]
async fn test_encode_endpoint_explicit_precision() {
    let server = create_test_server(8);

    let response = server.get("/encode?lat=40.7128&lon=-74.0060&precision=4").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["cell"], "dr5r");
    assert_eq!(json["precision"], 4);
}

#[tokio::test]
async fn test_encode_endpoint_out_of_range() {
    let server = create_test_server(8);

    let response = server.get("/encode?lat=91.0&lon=0.0").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("latitude"));

    let response = server.get("/encode?lat=0.0&lon=-180.5").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/encode?lat=0.0&lon=0.0&precision=13").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("precision"));
}

#[tokio::test]
async fn test_encode_endpoint_missing_params() {
    let server = create_test_server(8);

    // Missing lat parameter
    let response = server.get("/encode?lon=11.5").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Missing lon parameter
    let response = server.get("/encode?lat=48.1").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // No parameters
    let response = server.get("/encode").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_decode_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/decode?cell=ezs42").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["cell"], "ezs42");
    let lat = json["lat"].as_f64().unwrap();
    let lon = json["lon"].as_f64().unwrap();
    assert!((lat - 42.60498046875).abs() < 1e-12);
    assert!((lon - -5.60302734375).abs() < 1e-12);
}

#[tokio::test]
async fn test_decode_endpoint_invalid_cell() {
    let server = create_test_server(8);

    let response = server.get("/decode?cell=u0qa").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("position 3"));

    let response = server.get("/decode?cell=").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_bounds_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/bounds?cell=ezs42").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["min_lat"], 42.5830078125);
    assert_eq!(json["max_lat"], 42.626953125);
    assert_eq!(json["min_lon"], -5.625);
    assert_eq!(json["max_lon"], -5.5810546875);
}

#[tokio::test]
async fn test_neighbors_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/neighbors?cell=u0qj5v2k").await;
    response.assert_status_ok();
    let json: Value = response.json();
    let neighbors = json["neighbors"].as_array().unwrap();
    assert_eq!(neighbors.len(), 8);
    assert_eq!(neighbors[0], "u0qj5v2m");

    // Corner cell keeps only S, W and SW
    let response = server.get("/neighbors?cell=z").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["neighbors"], serde_json::json!(["x", "y", "w"]));
}

#[tokio::test]
async fn test_distance_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/distance?a=u281zd9z&b=u33db3gz").await;

    response.assert_status_ok();
    let json: Value = response.json();
    let km = json["distance_km"].as_f64().unwrap();
    assert!((km - 504.47).abs() < 0.1, "got {}", km);

    let response = server.get("/distance?a=u281zd9z&b=").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_precision_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/precision?radius_km=39").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["precision"], 4);

    let response = server.get("/precision?radius_km=0.00001").await;
    let json: Value = response.json();
    assert_eq!(json["precision"], 12);
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(8);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_stats_endpoint() {
    let server = create_test_server(6);

    // Initial stats (no requests yet)
    let response = server.get("/stats").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["cache_hits"], 0);
    assert_eq!(json["cache_misses"], 0);
    assert_eq!(json["default_precision"], 6);

    // First encode is a miss
    server.get("/encode?lat=35.6895&lon=139.6917").await;

    let response = server.get("/stats").await;
    let json: Value = response.json();
    assert_eq!(json["cache_misses"], 1);

    // Same coordinate again is a hit
    let response = server.get("/encode?lat=35.6895&lon=139.6917").await;
    let json: Value = response.json();
    assert_eq!(json["cell"], "xn774c");

    let response = server.get("/stats").await;
    let json: Value = response.json();
    assert_eq!(json["cache_hits"], 1);
    assert_eq!(json["cache_misses"], 1);
    assert_eq!(json["cached_cells"], 1);
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server(8);

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let json: Value = response.json();
    for path in ["/encode", "/decode", "/bounds", "/neighbors", "/distance", "/precision"] {
        assert!(json["paths"][path].is_object(), "missing {}", path);
    }
}
