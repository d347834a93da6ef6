//! Basic example demonstrating geocell library usage.
//!
//! Run with: cargo run --example basic -- [precision]

use geocell::{bounding_box, decode, distance, CellService, GeocellError};
use std::env;

fn main() -> Result<(), GeocellError> {
    let precision: usize = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(geocell::DEFAULT_PRECISION);

    let service = CellService::builder()
        .default_precision(precision)
        .cache_size(100)
        .build()?;

    // Encode some well-known places
    let locations = [
        ("Munich, Germany", 48.1351, 11.5820),
        ("Berlin, Germany", 52.5200, 13.4050),
        ("Mount Fuji, Japan", 35.3606, 138.7274),
        ("North Pole", 90.0, 0.0),
    ];

    println!("Cells at precision {}:", precision);
    println!("{:-<60}", "");

    let mut cells = Vec::new();
    for (name, lat, lon) in &locations {
        let cell = service.encode(*lat, *lon)?;
        let center = decode(&cell)?;
        let bbox = bounding_box(&cell)?;
        println!(
            "{:<20} {:<12} center ({})  {:.5}° x {:.5}°",
            name,
            cell,
            center,
            bbox.height(),
            bbox.width()
        );
        cells.push(cell);
    }

    println!("\nMunich -> Berlin: {:.1} km", distance(&cells[0], &cells[1])?);

    // Show cache statistics
    let _ = service.encode(48.1351, 11.5820)?;
    let stats = service.cache_stats();
    println!("\nCache statistics:");
    println!("  Cached cells: {}", stats.entry_count);
    println!("  Hits: {}", stats.hit_count);
    println!("  Misses: {}", stats.miss_count);
    println!("  Hit rate: {:.1}%", stats.hit_rate() * 100.0);

    Ok(())
}
