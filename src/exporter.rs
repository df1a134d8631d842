/// Writes processed flight tracks to `.gpx` files.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ProcessingConfig;
use crate::flight_data::{flight_number, Fix};
use crate::geodesy::track_length;
use crate::gpx_writer::to_gpx_string;
use crate::track_processor::TrackProcessor;

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub source: String,
    pub flight_number: String,
    pub output_filename: String,
    pub original_points: usize,
    pub processed_points: usize,
    pub original_distance_km: f64,
    pub processed_distance_km: f64,
    pub status: String,
}

impl ExportResult {
    pub fn failed(source: &str, error: &str) -> Self {
        ExportResult {
            source: source.to_string(),
            flight_number: "ERROR".to_string(),
            output_filename: "ERROR".to_string(),
            original_points: 0,
            processed_points: 0,
            original_distance_km: 0.0,
            processed_distance_km: 0.0,
            status: format!("ERROR: {}", error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "SUCCESS"
    }
}

/// `flight-<flightNumber>-<isoTimestamp>`, made safe for any filesystem.
fn export_stem(flight_number: &str, at: DateTime<Utc>) -> String {
    let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    clean_filename(&format!("flight-{}-{}", flight_number, stamp))
}

// ':' is reserved on Windows and in macOS Finder, and every ISO timestamp has two.
// Flight numbers come from vendor payloads, so path separators are stripped too.
fn clean_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Create a file that does not exist yet, appending `-1`, `-2`, ... to the stem
/// until a free name is found. Never truncates an earlier export.
fn create_unique(output_folder: &Path, stem: &str) -> std::io::Result<(File, String)> {
    let mut attempt = 0u32;
    loop {
        let filename = match attempt {
            0 => format!("{}.gpx", stem),
            n => format!("{}-{}.gpx", stem, n),
        };
        match OpenOptions::new().write(true).create_new(true).open(output_folder.join(&filename)) {
            Ok(file) => return Ok((file, filename)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Process `track` and write it into `output_folder`, returning the written
/// path together with point and distance statistics.
pub fn export_track(
    track: &[Fix],
    source: &str,
    output_folder: &Path,
    config: ProcessingConfig,
) -> crate::error::Result<(PathBuf, ExportResult)> {
    export_track_at(track, source, output_folder, config, Utc::now())
}

fn export_track_at(
    track: &[Fix],
    source: &str,
    output_folder: &Path,
    config: ProcessingConfig,
    now: DateTime<Utc>,
) -> crate::error::Result<(PathBuf, ExportResult)> {
    fs::create_dir_all(output_folder)?;

    let processed = TrackProcessor::new(config).process(track);
    let number = flight_number(track);
    let (mut file, output_filename) = create_unique(output_folder, &export_stem(number, now))?;
    let output_path = output_folder.join(&output_filename);

    file.write_all(to_gpx_string(&processed, now).as_bytes())?;

    log::info!(
        "Exported {} ({} -> {} points) to {}",
        number,
        track.len(),
        processed.len(),
        output_path.display()
    );

    let result = ExportResult {
        source: source.to_string(),
        flight_number: number.to_string(),
        output_filename,
        original_points: track.len(),
        processed_points: processed.len(),
        original_distance_km: track_length(track) / 1000.0,
        processed_distance_km: track_length(&processed) / 1000.0,
        status: "SUCCESS".to_string(),
    };

    Ok((output_path, result))
}
