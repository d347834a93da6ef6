use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Geohash cell encoding CLI tool
#[derive(Parser)]
#[command(name = "geocell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output results as JSON
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a coordinate into a cell string
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Cell length (1-12)
        #[arg(short, long, env = "GEOCELL_PRECISION", default_value = "8")]
        precision: usize,
    },

    /// Decode a cell string to the center of its region
    Decode {
        /// Cell string (e.g., u281zd9z)
        cell: String,
    },

    /// Show the bounding box of a cell
    Bounds {
        /// Cell string (e.g., u281zd9z)
        cell: String,
    },

    /// List the cells adjacent to a cell
    Neighbors {
        /// Cell string (e.g., u281zd9z)
        cell: String,
    },

    /// Great-circle distance between two cell centers
    Distance {
        /// First cell
        from: String,

        /// Second cell
        to: String,
    },

    /// Recommend a precision for a search radius
    Precision {
        /// Search radius in kilometers
        radius_km: f64,
    },

    /// Tag coordinates in a file with their cell strings
    Batch {
        /// Input file (CSV or GeoJSON)
        input: PathBuf,

        /// Output file (same format as input if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude (CSV only)
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude (CSV only)
        #[arg(long, default_value = "lon")]
        lon_col: String,

        /// Cell length (1-12)
        #[arg(short, long, env = "GEOCELL_PRECISION", default_value = "8")]
        precision: usize,

        /// Maximum cached encodings
        #[arg(long, env = "GEOCELL_CACHE_SIZE", default_value = "10000")]
        cache_size: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            lat,
            lon,
            precision,
        } => commands::encode::run(lat, lon, precision, cli.json),
        Commands::Decode { cell } => commands::decode::run(&cell, cli.json),
        Commands::Bounds { cell } => commands::decode::run_bounds(&cell, cli.json),
        Commands::Neighbors { cell } => commands::neighbors::run(&cell, cli.json),
        Commands::Distance { from, to } => commands::distance::run(&from, &to, cli.json),
        Commands::Precision { radius_km } => commands::precision::run(radius_km, cli.json),
        Commands::Batch {
            input,
            output,
            lat_col,
            lon_col,
            precision,
            cache_size,
        } => commands::batch::run(input, output, lat_col, lon_col, precision, cache_size),
    }
}
