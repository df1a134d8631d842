/// Linear interpolation between two fixes.
///
/// Numeric fields are blended, optional sensor fields only when both ends
/// have a reading, and identity fields are taken from the start fix.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::flight_data::Fix;

pub fn lerp(start: f64, end: f64, fraction: f64) -> f64 {
    start + (end - start) * fraction
}

/// Interpolate an optional reading. A missing value at either end yields `None`.
pub fn lerp_optional(start: Option<f64>, end: Option<f64>, fraction: f64) -> Option<f64> {
    match (start, end) {
        (Some(s), Some(e)) => Some(lerp(s, e, fraction)),
        _ => None,
    }
}

/// Blend two ISO-8601 timestamps at millisecond resolution.
///
/// Results that land exactly on an endpoint keep that endpoint's original text.
/// If either side fails to parse, the start timestamp is returned unchanged.
pub fn interpolate_timestamp(start: &str, end: &str, fraction: f64) -> String {
    let (start_ms, end_ms) = match (parse_millis(start), parse_millis(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            log::warn!("Cannot interpolate timestamps {:?} -> {:?}, keeping start", start, end);
            return start.to_string();
        }
    };

    let millis = lerp(start_ms as f64, end_ms as f64, fraction).trunc() as i64;
    if millis == start_ms {
        return start.to_string();
    }
    if millis == end_ms {
        return end.to_string();
    }

    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => start.to_string(),
    }
}

fn parse_millis(timestamp: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Synthesize the fix lying `fraction` of the way from `start` to `end`.
///
/// Identity and state strings always come from `start`, even as `fraction`
/// approaches 1.
pub fn interpolate_fix(start: &Fix, end: &Fix, fraction: f64) -> Fix {
    Fix {
        timestamp: interpolate_timestamp(&start.timestamp, &end.timestamp, fraction),
        latitude: lerp(start.latitude, end.latitude, fraction),
        longitude: lerp(start.longitude, end.longitude, fraction),
        altitude: lerp(start.altitude, end.altitude, fraction),
        groundspeed: lerp(start.groundspeed, end.groundspeed, fraction),
        heading: lerp(start.heading, end.heading, fraction),
        flight_duration: lerp(start.flight_duration, end.flight_duration, fraction),
        distance_to_go: lerp(start.distance_to_go, end.distance_to_go, fraction),
        time_to_go: lerp(start.time_to_go, end.time_to_go, fraction),

        airspeed: lerp_optional(start.airspeed, end.airspeed, fraction),
        air_temperature: lerp_optional(start.air_temperature, end.air_temperature, fraction),
        gross_weight: lerp_optional(start.gross_weight, end.gross_weight, fraction),
        wind_speed: lerp_optional(start.wind_speed, end.wind_speed, fraction),
        wind_direction: lerp_optional(start.wind_direction, end.wind_direction, fraction),

        ..start.clone()
    }
}
