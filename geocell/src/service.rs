//! Cell encoding service with LRU caching.
//!
//! This module provides [`CellService`], a thread-safe front end over
//! [`encode`](crate::encode) that memoizes results by input. Encoding is pure, so
//! a cached value is always identical to a fresh computation; the cache only
//! saves work for callers that tag many records at the same coordinates.
//!
//! ```
//! use geocell::CellService;
//!
//! let service = CellService::builder()
//!     .default_precision(6)
//!     .cache_size(1_000)
//!     .build()?;
//!
//! assert_eq!(service.encode(48.1351, 11.5820)?, "u281zd");
//! assert_eq!(service.encode(48.1351, 11.5820)?, "u281zd"); // served from cache
//! assert_eq!(service.cache_stats().hit_count, 1);
//! # Ok::<(), geocell::GeocellError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use crate::alphabet::{validate_coordinate, validate_precision, DEFAULT_PRECISION};
use crate::codec::encode;
use crate::error::Result;

/// Default maximum number of cached encodings.
pub const DEFAULT_CACHE_SIZE: u64 = 10_000;

/// Cache key: exact bit patterns of latitude and longitude, plus precision.
type CellKey = (u64, u64, usize);

/// Statistics about cache usage.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of encodings currently in the cache.
    pub entry_count: u64,
    /// Number of cache hits (requests served from cache).
    pub hit_count: u64,
    /// Number of cache misses (cells computed).
    pub miss_count: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

/// Thread-safe, caching cell encoder.
///
/// `CellService` can be shared across threads (e.g. behind an `Arc` in an HTTP
/// server) without additional locking.
pub struct CellService {
    /// Precision used by [`CellService::encode`].
    default_precision: usize,
    /// LRU cache of encoded cells.
    cell_cache: Cache<CellKey, String>,
    /// Number of cache hits.
    hit_count: AtomicU64,
    /// Number of cache misses.
    miss_count: AtomicU64,
}

impl CellService {
    /// Create a new cell service.
    ///
    /// # Arguments
    ///
    /// * `default_precision` - Precision used by [`CellService::encode`] (1 to 12)
    /// * `cache_size` - Maximum number of encodings to keep in memory
    ///
    /// An out-of-range `default_precision` is not rejected here; every call to
    /// [`CellService::encode`] will then fail with `InvalidPrecision`. Use
    /// [`CellService::builder`] to validate up front.
    pub fn new(default_precision: usize, cache_size: u64) -> Self {
        Self {
            default_precision,
            cell_cache: Cache::builder().max_capacity(cache_size).build(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Create a builder for more configuration options.
    pub fn builder() -> CellServiceBuilder {
        CellServiceBuilder::new()
    }

    /// Encode a coordinate at the service's default precision.
    pub fn encode(&self, lat: f64, lon: f64) -> Result<String> {
        self.encode_with_precision(lat, lon, self.default_precision)
    }

    /// Encode a coordinate at an explicit precision.
    ///
    /// Arguments are validated before the cache is consulted, so invalid input
    /// never counts as a hit or a miss.
    pub fn encode_with_precision(&self, lat: f64, lon: f64, precision: usize) -> Result<String> {
        validate_coordinate(lat, lon)?;
        validate_precision(precision)?;

        let key = (lat.to_bits(), lon.to_bits(), precision);
        if let Some(cell) = self.cell_cache.get(&key) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            return Ok(cell);
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);
        let cell = encode(lat, lon, precision)?;
        self.cell_cache.insert(key, cell.clone());

        Ok(cell)
    }

    /// Encode a batch of coordinates at the default precision.
    ///
    /// Returns one entry per input, `None` where the coordinate is invalid.
    pub fn encode_batch(&self, coords: &[(f64, f64)]) -> Vec<Option<String>> {
        coords
            .iter()
            .map(|&(lat, lon)| self.encode(lat, lon).ok())
            .collect()
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cell_cache.run_pending_tasks();
        CacheStats {
            entry_count: self.cell_cache.entry_count(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    /// Get the precision used by [`CellService::encode`].
    pub fn default_precision(&self) -> usize {
        self.default_precision
    }

    /// Get the maximum cache size.
    pub fn cache_capacity(&self) -> u64 {
        self.cell_cache.policy().max_capacity().unwrap_or(0)
    }

    /// Clear all cached encodings. Hit and miss counters are kept.
    pub fn clear_cache(&self) {
        self.cell_cache.invalidate_all();
    }
}

impl Default for CellService {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION, DEFAULT_CACHE_SIZE)
    }
}

/// Builder for [`CellService`].
#[derive(Debug, Clone)]
pub struct CellServiceBuilder {
    default_precision: usize,
    cache_size: u64,
}

impl Default for CellServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CellServiceBuilder {
    /// Create a builder with default precision 8 and cache size 10 000.
    pub fn new() -> Self {
        Self {
            default_precision: DEFAULT_PRECISION,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GEOCELL_PRECISION` | Default precision (1-12) | 8 |
    /// | `GEOCELL_CACHE_SIZE` | Maximum cached encodings | 10000 |
    ///
    /// Values that are not numbers fall back to the defaults. A numeric
    /// precision outside 1-12 is rejected by [`CellServiceBuilder::build`].
    ///
    /// ```bash
    /// export GEOCELL_PRECISION=6
    /// export GEOCELL_CACHE_SIZE=50000
    /// ```
    pub fn from_env() -> Self {
        let default_precision = std::env::var("GEOCELL_PRECISION")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PRECISION);

        let cache_size = std::env::var("GEOCELL_CACHE_SIZE")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_CACHE_SIZE);

        Self {
            default_precision,
            cache_size,
        }
    }

    /// Set the precision used by [`CellService::encode`].
    pub fn default_precision(mut self, precision: usize) -> Self {
        self.default_precision = precision;
        self
    }

    /// Set the maximum number of cached encodings.
    pub fn cache_size(mut self, size: u64) -> Self {
        self.cache_size = size;
        self
    }

    /// Build the [`CellService`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrecision` if the default precision is outside 1-12.
    pub fn build(self) -> Result<CellService> {
        validate_precision(self.default_precision)?;
        Ok(CellService::new(self.default_precision, self.cache_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocellError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_service_basic() {
        let service = CellService::new(8, 100);
        assert_eq!(service.encode(48.1351, 11.5820).unwrap(), "u281zd9z");
        assert_eq!(
            service.encode_with_precision(48.1351, 11.5820, 3).unwrap(),
            "u28"
        );
    }

    #[test]
    fn test_cache_hit() {
        let service = CellService::new(8, 100);

        let _ = service.encode(35.6895, 139.6917).unwrap();
        let stats1 = service.cache_stats();
        assert_eq!(stats1.miss_count, 1);
        assert_eq!(stats1.hit_count, 0);

        let _ = service.encode(35.6895, 139.6917).unwrap();
        let stats2 = service.cache_stats();
        assert_eq!(stats2.miss_count, 1);
        assert_eq!(stats2.hit_count, 1);
        assert_eq!(stats2.entry_count, 1);
        assert_eq!(stats2.hit_rate(), 0.5);
    }

    #[test]
    fn test_precision_is_part_of_key() {
        let service = CellService::new(8, 100);
        let coarse = service.encode_with_precision(40.7128, -74.0060, 4).unwrap();
        let fine = service.encode_with_precision(40.7128, -74.0060, 8).unwrap();

        assert_eq!(coarse, "dr5r");
        assert_eq!(fine, "dr5regw3");
        assert_eq!(service.cache_stats().miss_count, 2);
    }

    #[test]
    fn test_invalid_input_not_counted() {
        let service = CellService::new(8, 100);

        assert_eq!(
            service.encode(91.0, 0.0),
            Err(GeocellError::InvalidLatitude { lat: 91.0 })
        );
        assert!(service.encode_with_precision(0.0, 0.0, 13).is_err());

        let stats = service.cache_stats();
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count, 0);
    }

    #[test]
    fn test_invalid_default_precision() {
        let service = CellService::new(0, 100);
        assert_eq!(
            service.encode(0.0, 0.0),
            Err(GeocellError::InvalidPrecision { precision: 0 })
        );

        let result = CellService::builder().default_precision(13).build();
        assert!(matches!(
            result,
            Err(GeocellError::InvalidPrecision { precision: 13 })
        ));
    }

    #[test]
    fn test_encode_batch() {
        let service = CellService::new(5, 100);
        let coords = [(52.52, 13.405), (100.0, 0.0), (52.52, 13.405)];

        let cells = service.encode_batch(&coords);
        assert_eq!(
            cells,
            vec![Some("u33dc".to_string()), None, Some("u33dc".to_string())]
        );

        let stats = service.cache_stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_count, 1);
    }

    #[test]
    fn test_clear_cache() {
        let service = CellService::new(8, 100);
        let _ = service.encode(1.0, 1.0).unwrap();
        let _ = service.encode(2.0, 2.0).unwrap();
        assert_eq!(service.cache_stats().entry_count, 2);

        service.clear_cache();

        // Next lookup is a miss again
        let _ = service.encode(1.0, 1.0).unwrap();
        assert_eq!(service.cache_stats().miss_count, 3);
    }

    #[test]
    fn test_cache_capacity() {
        let service = CellService::new(8, 42);
        assert_eq!(service.cache_capacity(), 42);
        assert_eq!(service.default_precision(), 8);

        let service = CellService::default();
        assert_eq!(service.cache_capacity(), DEFAULT_CACHE_SIZE);
        assert_eq!(service.default_precision(), DEFAULT_PRECISION);
    }

    #[test]
    fn test_concurrent_encoding() {
        let service = Arc::new(CellService::new(7, 1_000));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for j in 0..100 {
                        let lat = -80.0 + (j as f64) * 1.6;
                        let lon = -170.0 + (i as f64) * 40.0;
                        let cached = service.encode(lat, lon).unwrap();
                        assert_eq!(cached, encode(lat, lon, 7).unwrap());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = service.cache_stats();
        assert_eq!(stats.hit_count + stats.miss_count, 800);
    }

    #[test]
    fn test_from_env() {
        let orig_precision = std::env::var("GEOCELL_PRECISION").ok();
        let orig_size = std::env::var("GEOCELL_CACHE_SIZE").ok();

        // Explicit values
        std::env::set_var("GEOCELL_PRECISION", "6");
        std::env::set_var("GEOCELL_CACHE_SIZE", "50");
        let builder = CellServiceBuilder::from_env();
        assert_eq!(builder.default_precision, 6);
        assert_eq!(builder.cache_size, 50);

        // Unparseable values fall back to defaults
        std::env::set_var("GEOCELL_PRECISION", "fine");
        std::env::remove_var("GEOCELL_CACHE_SIZE");
        let builder = CellServiceBuilder::from_env();
        assert_eq!(builder.default_precision, DEFAULT_PRECISION);
        assert_eq!(builder.cache_size, DEFAULT_CACHE_SIZE);

        // Out-of-range precision is rejected at build time
        std::env::set_var("GEOCELL_PRECISION", "20");
        assert!(CellServiceBuilder::from_env().build().is_err());

        match orig_precision {
            Some(v) => std::env::set_var("GEOCELL_PRECISION", v),
            None => std::env::remove_var("GEOCELL_PRECISION"),
        }
        match orig_size {
            Some(v) => std::env::set_var("GEOCELL_CACHE_SIZE", v),
            None => std::env::remove_var("GEOCELL_CACHE_SIZE"),
        }
    }
}
