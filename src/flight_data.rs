/// Flight fix model shared by every stage of the export pipeline.
///
/// Field names follow the vendor-normalized JSON the dashboard accumulates,
/// so a saved history deserializes straight into `Vec<Fix>`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::{point, Point};
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// One timestamped flight sample.
///
/// Vendors report unavailable readings as `null`. The plain numeric fields load
/// those as NaN so they flow through the pipeline and into the GPX as written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub timestamp: String,
    #[serde(deserialize_with = "nan_if_null")]
    pub latitude: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub longitude: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub altitude: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub groundspeed: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub heading: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub flight_duration: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub distance_to_go: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub time_to_go: f64,

    #[serde(default)]
    pub airspeed: Option<f64>,
    #[serde(default)]
    pub air_temperature: Option<f64>,
    #[serde(default)]
    pub gross_weight: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,

    pub flight_number: String,
    pub nose_id: String,
    pub vehicle_id: String,
    pub origin: String,
    pub destination: String,
    pub flight_id: String,
    #[serde(default)]
    pub door_state: Option<String>,
    pub wheel_weight_state: String,
    pub flight_phase: String,
    #[serde(default)]
    pub pa_state: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
}

fn nan_if_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Ordered sequence of fixes, oldest first.
pub type Track = Vec<Fix>;

impl Fix {
    /// Position as a geo point (x = longitude, y = latitude).
    pub fn position(&self) -> Point<f64> {
        point!(x: self.longitude, y: self.latitude)
    }
}

/// On-disk shapes accepted for a saved flight history.
#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Fixes(Vec<Fix>),
    Wrapped { history: Vec<Fix> },
}

/// Load a saved flight history: either a bare JSON array of fixes or an
/// object with a `history` array.
pub fn load_track(path: &Path) -> Result<Track> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let history: HistoryFile = serde_json::from_reader(reader)?;

    let track = match history {
        HistoryFile::Fixes(fixes) => fixes,
        HistoryFile::Wrapped { history } => history,
    };

    log::debug!("Loaded {} fixes from {}", track.len(), path.display());
    Ok(track)
}

/// Flight number of a track, taken from its first fix.
pub fn flight_number(track: &[Fix]) -> &str {
    track.first().map(|f| f.flight_number.as_str()).unwrap_or("unknown")
}

#[cfg(test)]
pub(crate) fn sample_fix(timestamp: &str, latitude: f64, longitude: f64) -> Fix {
    Fix {
        timestamp: timestamp.to_string(),
        latitude,
        longitude,
        altitude: 35000.0,
        groundspeed: 450.0,
        heading: 90.0,
        flight_duration: 7200.0,
        distance_to_go: 1200.0,
        time_to_go: 9000.0,
        airspeed: Some(480.0),
        air_temperature: Some(-52.0),
        gross_weight: None,
        wind_speed: Some(40.0),
        wind_direction: Some(270.0),
        flight_number: "AA123".to_string(),
        nose_id: "3AB".to_string(),
        vehicle_id: "N123AA".to_string(),
        origin: "JFK".to_string(),
        destination: "LAX".to_string(),
        flight_id: "AA123-20240501".to_string(),
        door_state: Some("CLOSED".to_string()),
        wheel_weight_state: "OFF".to_string(),
        flight_phase: "CRUISE".to_string(),
        pa_state: None,
        eta: Some("2024-05-01T18:30:00Z".to_string()),
    }
}

/// Fix in the shape the Intelsat adapter produces: no heading, distance or door state.
#[cfg(test)]
pub(crate) const INTELSAT_FIX_JSON: &str = r#"{
        "timestamp": "2024-05-01T12:00:00Z",
        "eta": null,
        "flightDuration": 245,
        "flightNumber": "AA2301",
        "latitude": 35.21,
        "longitude": -97.44,
        "noseId": "N/A",
        "paState": "CRUISE",
        "vehicleId": "N903NN",
        "destination": "KDFW",
        "origin": "KORD",
        "flightId": "AA2301",
        "airspeed": null,
        "airTemperature": 402.6,
        "altitude": 34000,
        "distanceToGo": null,
        "doorState": null,
        "groundspeed": 401.7,
        "heading": null,
        "timeToGo": 55,
        "wheelWeightState": "N/A",
        "grossWeight": null,
        "windSpeed": null,
        "windDirection": null,
        "flightPhase": "CRUISE"
    }"#;
