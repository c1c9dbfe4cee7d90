//! Geocoding abstraction layer.
//!
//! - `MockGeocoder` for tests and the default CLI backend (deterministic,
//!   no network).
//! - `NominatimGeocoder` for production, guarded by a [`CircuitBreaker`]
//!   so a failing Nominatim instance doesn't get hammered.
//!
//! Selected at runtime via the `GEOCODER_BACKEND` environment variable:
//! `"mock"` (default) or `"nominatim"`.

use anyhow::Result;
use async_trait::async_trait;

use super::nominatim::NominatimClient;
use super::Coordinates;

/// Abstraction over all geocoding implementations.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode a free-text location to coordinates. `None` means no match,
    /// not a failure.
    async fn geocode(&self, location: &str) -> Result<Option<GeocodingResult>>;

    fn name(&self) -> &'static str;
}

/// Result of a successful geocode.
#[derive(Debug, Clone)]
pub struct GeocodingResult {
    pub coordinates: Coordinates,
    pub confidence: f64,
    pub display_name: String,
}

// ============================================================================
// MockGeocoder
// ============================================================================

/// Deterministic fake geocoder: hashes the query into a coordinate inside
/// the contiguous United States. No network access, used for tests and as
/// the CLI's default backend.
pub struct MockGeocoder;

impl MockGeocoder {
    pub fn new() -> Self {
        Self
    }

    /// Contiguous-US bounds, with a safety margin so hashed points never
    /// land near the Canadian/Mexican borders or off the coast.
    fn hash_to_coordinates(location: &str) -> Coordinates {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        const LAT_MIN: f64 = 30.0;
        const LAT_MAX: f64 = 46.0;
        const LNG_MIN: f64 = -116.0;
        const LNG_MAX: f64 = -82.0;

        let mut hasher = DefaultHasher::new();
        location.hash(&mut hasher);
        let hash = hasher.finish();

        let lat_normalized = ((hash >> 32) as f64) / (u32::MAX as f64);
        let lng_normalized = ((hash & 0xFFFF_FFFF) as f64) / (u32::MAX as f64);

        Coordinates {
            lat: LAT_MIN + lat_normalized * (LAT_MAX - LAT_MIN),
            lng: LNG_MIN + lng_normalized * (LNG_MAX - LNG_MIN),
        }
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, location: &str) -> Result<Option<GeocodingResult>> {
        Ok(Some(GeocodingResult {
            coordinates: Self::hash_to_coordinates(location),
            confidence: 0.95,
            display_name: location.to_string(),
        }))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ============================================================================
// CircuitBreaker
// ============================================================================

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Failure counter that opens (rejects calls) after `threshold` consecutive
/// failures and half-opens (allows a retry) after `recovery_time` elapses.
pub struct CircuitBreaker {
    failure_count: AtomicU32,
    threshold: u32,
    last_failure: Arc<Mutex<Option<Instant>>>,
    recovery_time: Duration,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, recovery_time: Duration) -> Self {
        Self {
            failure_count: AtomicU32::new(0),
            threshold,
            last_failure: Arc::new(Mutex::new(None)),
            recovery_time,
        }
    }

    pub fn is_open(&self) -> bool {
        let count = self.failure_count.load(Ordering::Relaxed);
        if count >= self.threshold {
            if let Ok(last) = self.last_failure.try_lock() {
                if let Some(last_time) = *last {
                    if last_time.elapsed() >= self.recovery_time {
                        return false;
                    }
                }
            }
            return true;
        }
        false
    }

    pub fn record_failure(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_failure.try_lock() {
            *last = Some(Instant::now());
        }
    }

    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
    }
}

// ============================================================================
// NominatimGeocoder
// ============================================================================

const DEFAULT_CIRCUIT_BREAKER_THRESHOLD: u32 = 3;
const DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS: u64 = 300;

/// Nominatim-backed geocoder, circuit-broken against a failing instance.
pub struct NominatimGeocoder {
    client: NominatimClient,
    pub(crate) circuit_breaker: CircuitBreaker,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self::with_config(
            "https://nominatim.openstreetmap.org",
            DEFAULT_CIRCUIT_BREAKER_THRESHOLD,
            Duration::from_secs(DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS),
        )
    }

    pub fn with_config(base_url: &str, cb_threshold: u32, cb_recovery: Duration) -> Self {
        Self {
            client: NominatimClient::new(base_url),
            circuit_breaker: CircuitBreaker::new(cb_threshold, cb_recovery),
        }
    }

    /// Build from `NOMINATIM_URL` (and optional `NOMINATIM_CB_*` overrides).
    pub fn from_env() -> Self {
        let base_url = std::env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let cb_threshold = std::env::var("NOMINATIM_CB_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CIRCUIT_BREAKER_THRESHOLD);

        let cb_recovery_secs = std::env::var("NOMINATIM_CB_RECOVERY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CIRCUIT_BREAKER_RECOVERY_SECS);

        Self::with_config(&base_url, cb_threshold, Duration::from_secs(cb_recovery_secs))
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, location: &str) -> Result<Option<GeocodingResult>> {
        if self.circuit_breaker.is_open() {
            tracing::warn!("geocoding circuit breaker open, rejecting request");
            return Err(anyhow::anyhow!(
                "geocoding service temporarily unavailable (circuit breaker open)"
            ));
        }

        match self.client.geocode(location).await {
            Ok(Some(coordinates)) => {
                self.circuit_breaker.record_success();
                Ok(Some(GeocodingResult {
                    coordinates,
                    confidence: 0.8,
                    display_name: location.to_string(),
                }))
            }
            Ok(None) => {
                self.circuit_breaker.record_success();
                Ok(None)
            }
            Err(e) => {
                self.circuit_breaker.record_failure();
                tracing::error!("geocoding failed: {}", e);
                Err(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Create a geocoder based on the `GEOCODER_BACKEND` environment variable
/// (`"mock"` default, or `"nominatim"`).
pub fn create_geocoder() -> Box<dyn Geocoder> {
    let backend = std::env::var("GEOCODER_BACKEND").unwrap_or_else(|_| "mock".to_string());

    match backend.as_str() {
        "nominatim" => {
            tracing::info!("using NominatimGeocoder");
            Box::new(NominatimGeocoder::from_env())
        }
        "mock" => {
            tracing::info!("using MockGeocoder");
            Box::new(MockGeocoder::new())
        }
        other => {
            tracing::warn!("unknown GEOCODER_BACKEND '{}', using mock", other);
            Box::new(MockGeocoder::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_geocoder_always_resolves() {
        let geocoder = MockGeocoder::new();
        let result = geocoder.geocode("1600 Amphitheatre Pkwy, Mountain View, CA").await;
        assert!(result.unwrap().is_some());
    }

    #[tokio::test]
    async fn mock_geocoder_is_deterministic() {
        let geocoder = MockGeocoder::new();
        let a = geocoder.geocode("Denver, CO").await.unwrap().unwrap();
        let b = geocoder.geocode("Denver, CO").await.unwrap().unwrap();
        assert_eq!(a.coordinates.lat, b.coordinates.lat);
        assert_eq!(a.coordinates.lng, b.coordinates.lng);
    }

    #[tokio::test]
    async fn mock_geocoder_differs_by_query() {
        let geocoder = MockGeocoder::new();
        let a = geocoder.geocode("Denver, CO").await.unwrap().unwrap();
        let b = geocoder.geocode("Chicago, IL").await.unwrap().unwrap();
        assert_ne!(a.coordinates.lat, b.coordinates.lat);
    }

    #[tokio::test]
    async fn mock_geocoder_stays_within_contiguous_us_bounds() {
        let geocoder = MockGeocoder::new();
        for q in ["Denver, CO", "Chicago, IL", "Dallas, TX", "Atlanta, GA"] {
            let r = geocoder.geocode(q).await.unwrap().unwrap();
            assert!(r.coordinates.lat >= 30.0 && r.coordinates.lat <= 46.0);
            assert!(r.coordinates.lng >= -116.0 && r.coordinates.lng <= -82.0);
        }
    }

    #[test]
    fn circuit_breaker_starts_closed() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        assert!(!breaker.is_open());
    }

    #[test]
    fn circuit_breaker_opens_after_threshold_failures() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        breaker.record_failure();
        assert!(!breaker.is_open());
        breaker.record_failure();
        assert!(!breaker.is_open());
        breaker.record_failure();
        assert!(breaker.is_open());
    }

    #[test]
    fn circuit_breaker_resets_on_success() {
        let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        breaker.record_failure();
        assert!(!breaker.is_open());
    }

    #[tokio::test]
    async fn circuit_breaker_half_opens_after_recovery_window() {
        let breaker = CircuitBreaker::new(3, Duration::from_millis(50));
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_failure();
        assert!(breaker.is_open());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!breaker.is_open());
    }

    #[tokio::test]
    async fn nominatim_geocoder_rejects_when_circuit_breaker_open() {
        let geocoder = NominatimGeocoder::with_config(
            "https://nominatim.openstreetmap.org",
            1,
            Duration::from_secs(300),
        );
        geocoder.circuit_breaker.record_failure();
        assert!(geocoder.circuit_breaker.is_open());

        let result = geocoder.geocode("Denver, CO").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("circuit breaker"));
    }
}
