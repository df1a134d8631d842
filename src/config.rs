use crate::error::{ExportError, Result};

/// Tunables for track densification and smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingConfig {
    /// Largest allowed gap between consecutive output points, in meters
    pub max_distance_m: f64,
    /// Centered moving-average window, in points
    pub window_size: usize,
}

pub const DEFAULT_MAX_DISTANCE_M: f64 = 1000.0;
pub const DEFAULT_WINDOW_SIZE: usize = 3;

impl Default for ProcessingConfig {
    fn default() -> Self {
        ProcessingConfig {
            max_distance_m: DEFAULT_MAX_DISTANCE_M,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl ProcessingConfig {
    /// The gap limit must be a finite positive distance and the window at least one point.
    pub fn new(max_distance_m: f64, window_size: usize) -> Result<Self> {
        if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
            return Err(ExportError::InvalidConfig(format!(
                "max distance must be a positive number of meters, got {}",
                max_distance_m
            )));
        }
        if window_size == 0 {
            return Err(ExportError::InvalidConfig(
                "smoothing window must be at least 1 point".to_string(),
            ));
        }

        Ok(ProcessingConfig { max_distance_m, window_size })
    }
}
