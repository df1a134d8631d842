/// Great-circle distances on a spherical Earth.

use geo::Point;

use crate::flight_data::Fix;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two lat/lon pairs given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance between two geo points (x = lon, y = lat).
pub fn point_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    haversine_distance(a.y(), a.x(), b.y(), b.x())
}

pub fn fix_distance(a: &Fix, b: &Fix) -> f64 {
    point_distance(a.position(), b.position())
}

/// Total along-track length in meters.
pub fn track_length(track: &[Fix]) -> f64 {
    track.windows(2).map(|w| fix_distance(&w[0], &w[1])).sum()
}
