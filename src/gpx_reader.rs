/// Read back an exported GPX file and summarize its track.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use gpx::{read, Gpx, Time};

use crate::error::{ExportError, Result};
use crate::geodesy::point_distance;

#[derive(Debug, Clone)]
pub struct GpxSummary {
    pub track_name: Option<String>,
    pub points: usize,
    pub length_m: f64,
    pub max_spacing_m: f64,
    pub duration_seconds: Option<i64>,
}

pub fn inspect_gpx(path: &Path) -> Result<GpxSummary> {
    let file = File::open(path)?;
    let gpx = read(BufReader::new(file))?;

    if gpx.tracks.is_empty() {
        return Err(ExportError::NoTracks(path.to_path_buf()));
    }

    Ok(summarize(&gpx))
}

pub fn summarize(gpx: &Gpx) -> GpxSummary {
    let mut coords = Vec::new();
    let mut times = Vec::new();

    for track in &gpx.tracks {
        for segment in &track.segments {
            for point in &segment.points {
                coords.push(point.point());
                if let Some(t) = point.time.as_ref().and_then(to_chrono) {
                    times.push(t);
                }
            }
        }
    }

    let spacings: Vec<f64> = coords
        .windows(2)
        .map(|w| point_distance(w[0], w[1]))
        .collect();

    let duration_seconds = match (times.first(), times.last()) {
        (Some(first), Some(last)) if times.len() > 1 => {
            Some(last.signed_duration_since(*first).num_seconds())
        }
        _ => None,
    };

    GpxSummary {
        track_name: gpx.tracks.first().and_then(|t| t.name.clone()),
        points: coords.len(),
        length_m: spacings.iter().sum(),
        max_spacing_m: spacings.iter().cloned().fold(0.0, f64::max),
        duration_seconds,
    }
}

fn to_chrono(time: &Time) -> Option<DateTime<Utc>> {
    time.format().ok()?.parse::<DateTime<Utc>>().ok()
}
