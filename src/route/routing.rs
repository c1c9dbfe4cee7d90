//! Routing abstraction layer: turns two (or more) coordinates into a
//! distance/duration estimate, optionally with a polyline.
//!
//! - `MockRoutingService` for tests and the default CLI backend: haversine
//!   distance at [`DEFAULT_SPEED_MPH`], no network.
//! - `ValhallaRouter` for production, against a Valhalla `/route` endpoint.
//!
//! Selected at runtime via the `ROUTER_BACKEND` environment variable:
//! `"mock"` (default) or `"valhalla"`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::geo::{haversine_miles, DEFAULT_SPEED_MPH};
use super::Coordinates;

/// Result of a route lookup between an ordered sequence of waypoints.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub distance_mi: f64,
    pub duration_hr: f64,
    pub polyline: Option<String>,
    /// Driving minutes for each leg, in waypoint order. Used by the
    /// summary layer to derive `pre_pickup_drive_min` from the
    /// current → pickup leg without re-deriving it from total duration.
    pub leg_minutes: Vec<f64>,
}

/// Abstraction over all routing implementations.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Route through `waypoints` in order (at least 2 required).
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteResult>;

    fn name(&self) -> &'static str;
}

// ============================================================================
// MockRoutingService
// ============================================================================

/// Haversine-distance, fixed-speed router. No network access.
pub struct MockRoutingService;

impl MockRoutingService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockRoutingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoutingService for MockRoutingService {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteResult> {
        if waypoints.len() < 2 {
            return Err(anyhow::anyhow!("routing requires at least 2 waypoints"));
        }

        let mut leg_minutes = Vec::with_capacity(waypoints.len() - 1);
        let mut total_mi = 0.0;

        for pair in waypoints.windows(2) {
            let leg_mi = haversine_miles(&pair[0], &pair[1]);
            total_mi += leg_mi;
            leg_minutes.push((leg_mi / DEFAULT_SPEED_MPH) * 60.0);
        }

        Ok(RouteResult {
            distance_mi: total_mi,
            duration_hr: total_mi / DEFAULT_SPEED_MPH,
            polyline: None,
            leg_minutes,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// ============================================================================
// ValhallaRouter
// ============================================================================

#[derive(Debug, Deserialize)]
struct ValhallaRouteResponse {
    trip: ValhallaTrip,
}

#[derive(Debug, Deserialize)]
struct ValhallaTrip {
    summary: ValhallaSummary,
    legs: Vec<ValhallaLeg>,
}

#[derive(Debug, Deserialize)]
struct ValhallaLeg {
    summary: ValhallaSummary,
}

#[derive(Debug, Deserialize)]
struct ValhallaSummary {
    /// Kilometers.
    length: f64,
    /// Seconds.
    time: f64,
}

const KM_TO_MI: f64 = 0.621371;

/// HTTP client over a Valhalla `/route` endpoint.
pub struct ValhallaRouter {
    base_url: String,
    client: reqwest::Client,
}

impl ValhallaRouter {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("hos-trip-planner/1.0")
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VALHALLA_URL").unwrap_or_else(|_| "http://localhost:8002".to_string());
        Self::new(&base_url)
    }
}

#[async_trait]
impl RoutingService for ValhallaRouter {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteResult> {
        if waypoints.len() < 2 {
            return Err(anyhow::anyhow!("routing requires at least 2 waypoints"));
        }

        let locations: Vec<_> = waypoints
            .iter()
            .map(|c| json!({ "lat": c.lat, "lon": c.lng }))
            .collect();

        let body = json!({
            "locations": locations,
            "costing": "auto",
        });

        let url = format!("{}/route", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to send routing request")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "routing service returned status {}",
                response.status()
            ));
        }

        let parsed: ValhallaRouteResponse = response
            .json()
            .await
            .context("failed to parse routing response")?;

        let leg_minutes: Vec<f64> = parsed
            .trip
            .legs
            .iter()
            .map(|leg| leg.summary.time / 60.0)
            .collect();

        Ok(RouteResult {
            distance_mi: parsed.trip.summary.length * KM_TO_MI,
            duration_hr: parsed.trip.summary.time / 3600.0,
            polyline: None,
            leg_minutes,
        })
    }

    fn name(&self) -> &'static str {
        "valhalla"
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Create a routing service based on the `ROUTER_BACKEND` environment
/// variable (`"mock"` default, or `"valhalla"`).
pub fn create_routing_service() -> Box<dyn RoutingService> {
    let backend = std::env::var("ROUTER_BACKEND").unwrap_or_else(|_| "mock".to_string());

    match backend.as_str() {
        "valhalla" => {
            tracing::info!("using ValhallaRouter");
            Box::new(ValhallaRouter::from_env())
        }
        "mock" => {
            tracing::info!("using MockRoutingService");
            Box::new(MockRoutingService::new())
        }
        other => {
            tracing::warn!("unknown ROUTER_BACKEND '{}', using mock", other);
            Box::new(MockRoutingService::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denver() -> Coordinates {
        Coordinates {
            lat: 39.7392,
            lng: -104.9903,
        }
    }

    fn chicago() -> Coordinates {
        Coordinates {
            lat: 41.8781,
            lng: -87.6298,
        }
    }

    fn dallas() -> Coordinates {
        Coordinates {
            lat: 32.7767,
            lng: -96.7970,
        }
    }

    #[tokio::test]
    async fn mock_router_rejects_single_waypoint() {
        let router = MockRoutingService::new();
        let result = router.route(&[denver()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn mock_router_computes_two_leg_distance_and_duration() {
        let router = MockRoutingService::new();
        let result = router.route(&[denver(), dallas(), chicago()]).await.unwrap();
        assert_eq!(result.leg_minutes.len(), 2);
        assert!(result.distance_mi > 0.0);
        let expected_hr = result.distance_mi / DEFAULT_SPEED_MPH;
        assert!((result.duration_hr - expected_hr).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mock_router_leg_minutes_sum_consistent_with_total_duration() {
        let router = MockRoutingService::new();
        let result = router.route(&[denver(), dallas(), chicago()]).await.unwrap();
        let summed: f64 = result.leg_minutes.iter().sum();
        assert!((summed - result.duration_hr * 60.0).abs() < 1e-6);
    }
}
