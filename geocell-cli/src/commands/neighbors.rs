use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct NeighborEntry {
    direction: &'static str,
    cell: String,
}

pub fn run(cell: &str, json: bool) -> Result<()> {
    let neighbors = geocell::neighbors_by_direction(cell)
        .with_context(|| format!("Failed to find neighbors of '{}'", cell))?;

    if json {
        let entries: Vec<NeighborEntry> = neighbors
            .into_iter()
            .map(|(direction, cell)| NeighborEntry {
                direction: direction.abbreviation(),
                cell,
            })
            .collect();
        println!("{}", serde_json::to_string(&entries)?);
    } else {
        for (direction, neighbor) in neighbors {
            println!("{:<2} {}", direction.abbreviation(), neighbor);
        }
    }

    Ok(())
}
