use anyhow::{bail, Context, Result};
use geocell::geojson::tag_feature_with;
use geocell::CellService;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the column (CSV) or property (GeoJSON) that receives the cell.
const CELL_COLUMN: &str = "geohash";

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    lat_col: String,
    lon_col: String,
    precision: usize,
    cache_size: u64,
) -> Result<()> {
    let service = CellService::builder()
        .default_precision(precision)
        .cache_size(cache_size)
        .build()
        .context("Failed to create cell service")?;

    // Detect file format
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let output_path = output.unwrap_or_else(|| default_output(&input, "csv"));
            let tagged = process_csv(&service, &input, &output_path, &lat_col, &lon_col)?;
            println!(
                "Tagged {} rows, output written to: {}",
                tagged,
                output_path.display()
            );
        }
        "geojson" | "json" => {
            let output_path = output.unwrap_or_else(|| default_output(&input, "geojson"));
            let tagged = process_geojson(&service, &input, &output_path)?;
            println!(
                "Tagged {} features, output written to: {}",
                tagged,
                output_path.display()
            );
        }
        _ => bail!(
            "Unsupported file format: {}. Use .csv or .geojson",
            extension
        ),
    }

    let stats = service.cache_stats();
    println!(
        "Cache: {} hits, {} misses ({:.1}% hit rate)",
        stats.hit_count,
        stats.miss_count,
        stats.hit_rate() * 100.0
    );

    Ok(())
}

fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_{}.{}", stem, CELL_COLUMN, extension))
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Append a cell column to every CSV row.
///
/// Rows whose coordinates are missing, unparseable or out of range get an
/// empty cell. Returns the number of rows that received a cell.
fn process_csv(
    service: &CellService,
    input: &Path,
    output_path: &Path,
    lat_col: &str,
    lon_col: &str,
) -> Result<u64> {
    let file = File::open(input).context("Failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == lat_col)
        .with_context(|| format!("Column '{}' not found in CSV", lat_col))?;
    let lon_idx = headers
        .iter()
        .position(|h| h == lon_col)
        .with_context(|| format!("Column '{}' not found in CSV", lon_col))?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let pb = progress_bar(records.len() as u64)?;

    let output_file = File::create(output_path).context("Failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push(CELL_COLUMN);
    writer.write_record(&new_headers)?;

    let mut tagged = 0;
    for record in &records {
        let lat = record.get(lat_idx).and_then(|v| v.trim().parse::<f64>().ok());
        let lon = record.get(lon_idx).and_then(|v| v.trim().parse::<f64>().ok());

        let cell = match (lat, lon) {
            (Some(lat), Some(lon)) => service.encode(lat, lon).ok(),
            _ => None,
        };
        if cell.is_some() {
            tagged += 1;
        }

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(cell.as_deref().unwrap_or(""));
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    Ok(tagged)
}

/// Add a cell property to every point feature of a GeoJSON file.
///
/// Encodings go through `service`, so repeated positions are cache hits.
/// Returns the number of features tagged.
fn process_geojson(service: &CellService, input: &Path, output_path: &Path) -> Result<usize> {
    let file = File::open(input).context("Failed to open input file")?;
    let reader = BufReader::new(file);

    let geojson: geojson::GeoJson =
        serde_json::from_reader(reader).context("Failed to parse GeoJSON")?;

    let encode_point = |lat: f64, lon: f64| service.encode(lat, lon);
    let (result, tagged) = match geojson {
        geojson::GeoJson::Feature(mut feature) => {
            let tagged = tag_feature_with(&mut feature, encode_point)?;
            (geojson::GeoJson::Feature(feature), usize::from(tagged))
        }
        geojson::GeoJson::FeatureCollection(mut fc) => {
            let pb = progress_bar(fc.features.len() as u64)?;
            let mut tagged = 0;
            for feature in &mut fc.features {
                if tag_feature_with(feature, encode_point)? {
                    tagged += 1;
                }
                pb.inc(1);
            }
            pb.finish_with_message("done");
            (geojson::GeoJson::FeatureCollection(fc), tagged)
        }
        geojson::GeoJson::Geometry(_) => {
            bail!("A bare geometry has no properties to tag; wrap it in a Feature")
        }
    };

    let output_file = File::create(output_path).context("Failed to create output file")?;
    let mut writer = BufWriter::new(output_file);
    serde_json::to_writer_pretty(&mut writer, &result)?;
    writer.flush()?;

    Ok(tagged)
}
