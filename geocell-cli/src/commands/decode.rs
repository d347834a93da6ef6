use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct DecodeResponse<'a> {
    cell: &'a str,
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct BoundsResponse<'a> {
    cell: &'a str,
    #[serde(flatten)]
    bounds: geocell::BoundingBox,
}

pub fn run(cell: &str, json: bool) -> Result<()> {
    let center = geocell::decode(cell).with_context(|| format!("Failed to decode '{}'", cell))?;

    if json {
        let response = DecodeResponse {
            cell,
            lat: center.lat,
            lon: center.lon,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", center);
    }

    Ok(())
}

pub fn run_bounds(cell: &str, json: bool) -> Result<()> {
    let bounds =
        geocell::bounding_box(cell).with_context(|| format!("Failed to decode '{}'", cell))?;

    if json {
        let response = BoundsResponse { cell, bounds };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("Cell:      {}", cell);
        println!("Latitude:  {} to {}", bounds.min_lat, bounds.max_lat);
        println!("Longitude: {} to {}", bounds.min_lon, bounds.max_lon);
        println!(
            "Size:      {:.6}° x {:.6}° (lat x lon)",
            bounds.height(),
            bounds.width()
        );
    }

    Ok(())
}
