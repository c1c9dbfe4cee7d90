//! Route Summary resolution: the fallback chain that turns free-text
//! current/pickup/dropoff locations into the `distance_mi`/`duration_hr`/
//! `pre_pickup_drive_min` triple the HOS core consumes.
//!
//! Grounded in the original `route.py`'s `get_route_summary`: try the
//! caller's explicit shortcut first, then geocode-and-route, then a
//! haversine estimate over whatever geocoded, then a fixed mileage
//! default as the last resort. Every downgrade is logged so an operator
//! can tell which tier actually served a given trip.

use super::geo::{haversine_miles, DEFAULT_SPEED_MPH};
use super::geocoding::Geocoder;
use super::routing::RoutingService;
use super::Coordinates;

/// Distance assumed when nothing could be geocoded at all.
const FIXED_FALLBACK_MILES: f64 = 500.0;

/// Caller-supplied trip description, before any geocoding happens.
#[derive(Debug, Clone)]
pub struct RouteSummaryRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Short-circuits geocoding entirely when supplied.
    pub assume_distance_mi: Option<f64>,
}

/// Resolved trip geometry, ready to feed `hos::PlanRequest`.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    pub distance_mi: f64,
    pub duration_hr: f64,
    pub polyline: Option<String>,
    pub pre_pickup_drive_min: i64,
}

/// Resolve a [`RouteSummary`] by walking the fallback chain: explicit
/// override, then geocode+route, then haversine, then a fixed default.
pub async fn resolve_route_summary(
    req: &RouteSummaryRequest,
    geocoder: &dyn Geocoder,
    router: &dyn RoutingService,
) -> RouteSummary {
    if let Some(assume_mi) = req.assume_distance_mi {
        tracing::info!(distance_mi = assume_mi, "using caller-supplied assume_distance_mi");
        return RouteSummary {
            distance_mi: assume_mi,
            duration_hr: assume_mi / DEFAULT_SPEED_MPH,
            polyline: None,
            pre_pickup_drive_min: 0,
        };
    }

    let current = geocode_or_warn(geocoder, &req.current_location).await;
    let pickup = geocode_or_warn(geocoder, &req.pickup_location).await;
    let dropoff = geocode_or_warn(geocoder, &req.dropoff_location).await;

    if let (Some(current), Some(pickup), Some(dropoff)) = (current, pickup, dropoff) {
        match router.route(&[current, pickup, dropoff]).await {
            Ok(result) => {
                let pre_pickup_drive_min = result
                    .leg_minutes
                    .first()
                    .copied()
                    .map(|m| m.round() as i64)
                    .unwrap_or(0);

                return RouteSummary {
                    distance_mi: result.distance_mi,
                    duration_hr: result.duration_hr,
                    polyline: result.polyline,
                    pre_pickup_drive_min,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "routing service unavailable, falling back to haversine");
                return haversine_fallback(Some(current), Some(pickup), Some(dropoff));
            }
        }
    }

    tracing::warn!("one or more locations failed to geocode, falling back to haversine");
    haversine_fallback(current, pickup, dropoff)
}

async fn geocode_or_warn(geocoder: &dyn Geocoder, location: &str) -> Option<Coordinates> {
    match geocoder.geocode(location).await {
        Ok(Some(result)) => Some(result.coordinates),
        Ok(None) => {
            tracing::warn!(location, "geocoder returned no match");
            None
        }
        Err(e) => {
            tracing::warn!(location, error = %e, "geocoding failed");
            None
        }
    }
}

/// Great-circle distance over whichever of current/pickup/dropoff
/// resolved. Falls back further to a fixed mileage default if nothing
/// resolved at all.
fn haversine_fallback(
    current: Option<Coordinates>,
    pickup: Option<Coordinates>,
    dropoff: Option<Coordinates>,
) -> RouteSummary {
    match (current, pickup, dropoff) {
        (Some(current), Some(pickup), Some(dropoff)) => {
            let pre_pickup_mi = haversine_miles(&current, &pickup);
            let pickup_to_drop_mi = haversine_miles(&pickup, &dropoff);
            let distance_mi = pre_pickup_mi + pickup_to_drop_mi;
            RouteSummary {
                distance_mi,
                duration_hr: distance_mi / DEFAULT_SPEED_MPH,
                polyline: None,
                pre_pickup_drive_min: ((pre_pickup_mi / DEFAULT_SPEED_MPH) * 60.0).round() as i64,
            }
        }
        (Some(a), Some(b), None) | (Some(a), None, Some(b)) | (None, Some(a), Some(b)) => {
            let distance_mi = haversine_miles(&a, &b);
            RouteSummary {
                distance_mi,
                duration_hr: distance_mi / DEFAULT_SPEED_MPH,
                polyline: None,
                pre_pickup_drive_min: 0,
            }
        }
        _ => {
            tracing::warn!(
                distance_mi = FIXED_FALLBACK_MILES,
                "nothing geocoded, using fixed distance default"
            );
            RouteSummary {
                distance_mi: FIXED_FALLBACK_MILES,
                duration_hr: FIXED_FALLBACK_MILES / DEFAULT_SPEED_MPH,
                polyline: None,
                pre_pickup_drive_min: 0,
            }
        }
    }
}
