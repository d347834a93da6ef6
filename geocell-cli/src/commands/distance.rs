use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct DistanceResponse<'a> {
    from: &'a str,
    to: &'a str,
    distance_km: f64,
}

pub fn run(from: &str, to: &str, json: bool) -> Result<()> {
    let distance_km = geocell::distance(from, to).context("Failed to compute distance")?;

    if json {
        let response = DistanceResponse {
            from,
            to,
            distance_km,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{:.3} km", distance_km);
    }

    Ok(())
}
