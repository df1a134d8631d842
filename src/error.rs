use std::path::PathBuf;
use thiserror::Error;

/// Failures from the layers around the track pipeline: loading fix history,
/// writing exported files and reading them back. The pipeline itself never fails.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid flight history JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GPX parse error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("invalid processing settings: {0}")]
    InvalidConfig(String),
    #[error("no tracks found in GPX file {}", .0.display())]
    NoTracks(PathBuf),
}

pub type Result<T> = std::result::Result<T, ExportError>;
