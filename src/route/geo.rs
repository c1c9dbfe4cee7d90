//! Great-circle distance and the fixed-speed fallback estimate used when no
//! router is available.

use super::Coordinates;

/// Earth radius in miles.
const EARTH_RADIUS_MI: f64 = 3958.7613;

/// Fixed fallback speed (mph), used for the `assume_distance_mi` shortcut
/// and whenever the haversine fallback applies.
pub const DEFAULT_SPEED_MPH: f64 = 50.0;

/// Straight-line distance between two points, in miles.
pub fn haversine_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MI * c
}
