/// Centered moving-average smoothing of position and kinematics.
///
/// Windows shrink at the ends of the track instead of padding, so boundary
/// points average over fewer neighbors.

use crate::flight_data::Fix;

#[derive(Debug, Clone, Copy)]
pub struct MovingAverageSmoother {
    window_size: usize,
}

impl MovingAverageSmoother {
    pub fn new(window_size: usize) -> Self {
        MovingAverageSmoother { window_size }
    }

    /// Smooth latitude, longitude, altitude, groundspeed and heading. Every
    /// other field is copied from the fix at the same index.
    pub fn smooth(&self, track: &[Fix]) -> Vec<Fix> {
        let latitudes: Vec<f64> = track.iter().map(|f| f.latitude).collect();
        let longitudes: Vec<f64> = track.iter().map(|f| f.longitude).collect();
        let altitudes: Vec<f64> = track.iter().map(|f| f.altitude).collect();
        let speeds: Vec<f64> = track.iter().map(|f| f.groundspeed).collect();
        let headings: Vec<f64> = track.iter().map(|f| f.heading).collect();

        track
            .iter()
            .enumerate()
            .map(|(i, fix)| Fix {
                latitude: self.smooth_value(&latitudes, i),
                longitude: self.smooth_value(&longitudes, i),
                altitude: self.smooth_value(&altitudes, i),
                groundspeed: self.smooth_value(&speeds, i),
                heading: self.smooth_value(&headings, i),
                ..fix.clone()
            })
            .collect()
    }

    fn smooth_value(&self, values: &[f64], index: usize) -> f64 {
        let half = self.window_size / 2;
        let start = index.saturating_sub(half);
        let end = (index + half + 1).min(values.len());
        let window = &values[start..end];
        window.iter().sum::<f64>() / window.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_data::sample_fix;

    fn track_with_altitudes(altitudes: &[f64]) -> Vec<Fix> {
        altitudes
            .iter()
            .enumerate()
            .map(|(i, &alt)| {
                let mut fix = sample_fix(&format!("2024-05-01T12:00:{:02}.000Z", i), 0.0, i as f64 * 0.001);
                fix.altitude = alt;
                fix
            })
            .collect()
    }

    #[test]
    fn test_window_of_three_with_short_edges() {
        let track = track_with_altitudes(&[100.0, 200.0, 600.0, 400.0]);
        let smoothed = MovingAverageSmoother::new(3).smooth(&track);

        assert_eq!(smoothed.len(), 4);
        assert_eq!(smoothed[0].altitude, 150.0);
        assert_eq!(smoothed[1].altitude, 300.0);
        assert_eq!(smoothed[2].altitude, 400.0);
        assert_eq!(smoothed[3].altitude, 500.0);
    }

    #[test]
    fn test_unsmoothed_fields_untouched() {
        let mut track = track_with_altitudes(&[100.0, 200.0, 300.0]);
        track[1].distance_to_go = 5.0;
        track[1].flight_number = "XX1".to_string();
        let smoothed = MovingAverageSmoother::new(3).smooth(&track);

        for (before, after) in track.iter().zip(&smoothed) {
            assert_eq!(before.timestamp, after.timestamp);
            assert_eq!(before.flight_number, after.flight_number);
            assert_eq!(before.distance_to_go, after.distance_to_go);
            assert_eq!(before.airspeed, after.airspeed);
        }
    }

    #[test]
    fn test_constant_fields_stay_constant() {
        let track = track_with_altitudes(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        let smoothed = MovingAverageSmoother::new(3).smooth(&track);
        assert!(smoothed.iter().all(|f| f.groundspeed == 450.0 && f.heading == 90.0));
    }

    #[test]
    fn test_window_size_one_is_identity() {
        let track = track_with_altitudes(&[5.0, 50.0, 500.0]);
        assert_eq!(MovingAverageSmoother::new(1).smooth(&track), track);
    }

    #[test]
    fn test_empty_track() {
        assert!(MovingAverageSmoother::new(3).smooth(&[]).is_empty());
    }
}
