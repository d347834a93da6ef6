//! Python bindings for the geocell geohash library.

#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

// Use fully qualified path to avoid collision with the Python module name
use ::geocell as geocell_lib;

fn to_py_err(e: geocell_lib::GeocellError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Cache statistics for the cell service.
#[pyclass]
#[derive(Clone)]
struct CacheStats {
    /// Number of encodings currently in the cache.
    #[pyo3(get)]
    entry_count: u64,
    /// Number of cache hits.
    #[pyo3(get)]
    hit_count: u64,
    /// Number of cache misses.
    #[pyo3(get)]
    miss_count: u64,
}

#[pymethods]
impl CacheStats {
    /// Calculate the cache hit rate (0.0 to 1.0).
    #[getter]
    fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CacheStats(entry_count={}, hit_count={}, miss_count={}, hit_rate={:.2}%)",
            self.entry_count,
            self.hit_count,
            self.miss_count,
            self.hit_rate() * 100.0
        )
    }
}

/// Geohash encoder with LRU caching.
///
/// Useful when tagging many records that share coordinates.
///
/// Example:
///     >>> service = CellService(precision=6, cache_size=10000)
///     >>> service.encode(48.1351, 11.5820)
///     'u281zd'
#[pyclass]
struct CellService {
    inner: geocell_lib::CellService,
}

#[pymethods]
impl CellService {
    /// Create a new cell service.
    ///
    /// Args:
    ///     precision: Default cell length, 1 to 12 (default: 8).
    ///     cache_size: Maximum number of encodings to keep in cache (default: 10000).
    ///
    /// Raises:
    ///     ValueError: If precision is out of range.
    #[new]
    #[pyo3(signature = (precision=geocell_lib::DEFAULT_PRECISION, cache_size=10_000))]
    fn new(precision: usize, cache_size: u64) -> PyResult<Self> {
        let inner = geocell_lib::CellService::builder()
            .default_precision(precision)
            .cache_size(cache_size)
            .build()
            .map_err(to_py_err)?;
        Ok(CellService { inner })
    }

    /// Encode a coordinate.
    ///
    /// Args:
    ///     lat: Latitude in decimal degrees (-90 to 90).
    ///     lon: Longitude in decimal degrees (-180 to 180).
    ///     precision: Cell length; the service default when omitted.
    ///
    /// Returns:
    ///     Geohash string.
    ///
    /// Raises:
    ///     ValueError: If the coordinate or precision is out of range.
    #[pyo3(signature = (lat, lon, precision=None))]
    fn encode(&self, lat: f64, lon: f64, precision: Option<usize>) -> PyResult<String> {
        let precision = precision.unwrap_or_else(|| self.inner.default_precision());
        self.inner
            .encode_with_precision(lat, lon, precision)
            .map_err(to_py_err)
    }

    /// Encode many coordinates at the default precision.
    ///
    /// Returns:
    ///     One entry per input, None where the coordinate is invalid.
    fn encode_batch(&self, coords: Vec<(f64, f64)>) -> Vec<Option<String>> {
        self.inner.encode_batch(&coords)
    }

    /// Get current cache statistics.
    fn cache_stats(&self) -> CacheStats {
        let stats = self.inner.cache_stats();
        CacheStats {
            entry_count: stats.entry_count,
            hit_count: stats.hit_count,
            miss_count: stats.miss_count,
        }
    }

    /// Drop all cached encodings.
    fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    #[getter]
    fn precision(&self) -> usize {
        self.inner.default_precision()
    }

    fn __repr__(&self) -> String {
        let stats = self.cache_stats();
        format!(
            "CellService(precision={}, cached_cells={}, hit_rate={:.1}%)",
            self.inner.default_precision(),
            stats.entry_count,
            stats.hit_rate() * 100.0
        )
    }
}

/// Encode a coordinate into a geohash.
///
/// Example:
///     >>> encode(48.1351, 11.5820)
///     'u281zd9z'
#[pyfunction]
#[pyo3(signature = (lat, lon, precision=geocell_lib::DEFAULT_PRECISION))]
fn encode(lat: f64, lon: f64, precision: usize) -> PyResult<String> {
    geocell_lib::encode(lat, lon, precision).map_err(to_py_err)
}

/// Decode a geohash into the (lat, lon) center of its cell.
#[pyfunction]
fn decode(cell: &str) -> PyResult<(f64, f64)> {
    let center = geocell_lib::decode(cell).map_err(to_py_err)?;
    Ok((center.lat, center.lon))
}

/// Region of a geohash as (min_lat, max_lat, min_lon, max_lon).
///
/// Example:
///     >>> bounding_box("ezs42")
///     (42.5830078125, 42.626953125, -5.625, -5.5810546875)
#[pyfunction]
fn bounding_box(cell: &str) -> PyResult<(f64, f64, f64, f64)> {
    let bbox = geocell_lib::bounding_box(cell).map_err(to_py_err)?;
    Ok((bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon))
}

/// Adjacent cells in N, S, E, W, NE, NW, SE, SW order.
///
/// Directions that fall off the map are left out, so the list may be
/// shorter than 8.
#[pyfunction]
fn neighbors(cell: &str) -> PyResult<Vec<String>> {
    geocell_lib::neighbors(cell).map_err(to_py_err)
}

/// Haversine distance in kilometers between two cell centers.
#[pyfunction]
fn distance(a: &str, b: &str) -> PyResult<f64> {
    geocell_lib::distance(a, b).map_err(to_py_err)
}

/// Coarsest precision whose cell size does not exceed `radius_km`.
#[pyfunction]
fn precision_for_radius(radius_km: f64) -> usize {
    geocell_lib::precision_for_radius(radius_km)
}

/// geocell - geohash spatial cells.
///
/// Example:
///     >>> import geocell_rs
///     >>> cell = geocell_rs.encode(48.1351, 11.5820, 8)
///     >>> geocell_rs.neighbors(cell)
#[pymodule]
fn geocell_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CellService>()?;
    m.add_class::<CacheStats>()?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(bounding_box, m)?)?;
    m.add_function(wrap_pyfunction!(neighbors, m)?)?;
    m.add_function(wrap_pyfunction!(distance, m)?)?;
    m.add_function(wrap_pyfunction!(precision_for_radius, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("ALPHABET", std::str::from_utf8(geocell_lib::ALPHABET)?)?;
    m.add("MAX_PRECISION", geocell_lib::MAX_PRECISION)?;
    Ok(())
}
