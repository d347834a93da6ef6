use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct PrecisionResponse {
    radius_km: f64,
    precision: usize,
    cell_size_km: Option<f64>,
}

pub fn run(radius_km: f64, json: bool) -> Result<()> {
    let precision = geocell::precision_for_radius(radius_km);
    let cell_size_km = geocell::cell_size_km(precision);

    if json {
        let response = PrecisionResponse {
            radius_km,
            precision,
            cell_size_km,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else if let Some(size) = cell_size_km {
        println!("{} (cells ~{} km)", precision, size);
    } else {
        println!("{}", precision);
    }

    Ok(())
}
