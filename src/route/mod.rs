//! Route Summary: the ambient layer that turns free-text current/pickup/
//! dropoff locations into the `distance_mi`/`duration_hr`/
//! `pre_pickup_drive_min` triple the HOS core consumes.
//!
//! This layer is strictly upstream of [`crate::hos::Planner`]: the core
//! never geocodes or calls a router, it only ever sees the resolved
//! triple. Unlike the core, this layer is async — geocoding and routing
//! are network calls — and degrades through a fallback chain instead of
//! failing outright.

mod geo;
mod geocoding;
mod nominatim;
mod routing;
mod summary;

pub use geo::{haversine_miles, DEFAULT_SPEED_MPH};
pub use geocoding::{create_geocoder, CircuitBreaker, Geocoder, GeocodingResult, MockGeocoder, NominatimGeocoder};
pub use nominatim::NominatimClient;
pub use routing::{create_routing_service, MockRoutingService, RouteResult, RoutingService, ValhallaRouter};
pub use summary::{resolve_route_summary, RouteSummary, RouteSummaryRequest};

/// Geographic coordinates (WGS84 decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}
