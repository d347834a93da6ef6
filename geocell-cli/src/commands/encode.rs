use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct EncodeResponse<'a> {
    lat: f64,
    lon: f64,
    precision: usize,
    cell: &'a str,
}

pub fn run(lat: f64, lon: f64, precision: usize, json: bool) -> Result<()> {
    let cell = geocell::encode(lat, lon, precision).context("Failed to encode coordinate")?;

    if json {
        let response = EncodeResponse {
            lat,
            lon,
            precision,
            cell: &cell,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", cell);
    }

    Ok(())
}
