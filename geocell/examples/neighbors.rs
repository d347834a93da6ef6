//! Neighbor lookup, including cells at the edge of the map.
//!
//! Run with: cargo run --example neighbors -- u281zd9z

use geocell::{neighbors_by_direction, GeocellError};
use std::env;

fn main() -> Result<(), GeocellError> {
    let cells: Vec<String> = env::args().skip(1).collect();
    let cells = if cells.is_empty() {
        // An interior cell, a polar cell and a corner cell
        vec!["u281zd9z".to_string(), "u".to_string(), "zzzzzzzz".to_string()]
    } else {
        cells
    };

    for cell in &cells {
        let neighbors = neighbors_by_direction(cell)?;
        println!("{} ({} neighbors)", cell, neighbors.len());
        for (direction, neighbor) in neighbors {
            println!("  {:<2} {}", direction.abbreviation(), neighbor);
        }
    }

    Ok(())
}
