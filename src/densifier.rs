/// Gap densification: bound the spacing between consecutive fixes by
/// inserting interpolated points wherever two samples are too far apart.

use crate::flight_data::Fix;
use crate::geodesy::fix_distance;
use crate::interpolation::interpolate_fix;

#[derive(Debug, Clone, Copy)]
pub struct GapDensifier {
    max_distance_m: f64,
}

impl GapDensifier {
    pub fn new(max_distance_m: f64) -> Self {
        GapDensifier { max_distance_m }
    }

    /// Return a new track containing every input fix in order, plus
    /// `ceil(d / max) - 1` evenly spaced synthetic fixes inside each gap `d`
    /// that exceeds the limit.
    pub fn densify(&self, track: &[Fix]) -> Vec<Fix> {
        if track.len() < 2 {
            return track.to_vec();
        }

        let mut densified = Vec::with_capacity(track.len());
        let mut inserted = 0;

        for pair in track.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            densified.push(current.clone());

            let distance = fix_distance(current, next);
            if distance > self.max_distance_m {
                let num_points = (distance / self.max_distance_m).ceil() as usize;
                for j in 1..num_points {
                    let fraction = j as f64 / num_points as f64;
                    densified.push(interpolate_fix(current, next, fraction));
                }
                inserted += num_points - 1;
            }
        }

        if let Some(last) = track.last() {
            densified.push(last.clone());
        }

        log::debug!(
            "Densified {} fixes -> {} ({} synthetic, max gap {:.0}m)",
            track.len(),
            densified.len(),
            inserted,
            self.max_distance_m
        );

        densified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_data::sample_fix;

    #[test]
    fn test_short_tracks_pass_through() {
        let densifier = GapDensifier::new(1000.0);
        assert!(densifier.densify(&[]).is_empty());

        let single = vec![sample_fix("2024-05-01T12:00:00.000Z", 10.0, 10.0)];
        assert_eq!(densifier.densify(&single), single);
    }

    #[test]
    fn test_equator_gap_gets_two_interior_points() {
        // ~2224m apart: ceil(2.224) = 3 segments
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 0.0, 0.0),
            sample_fix("2024-05-01T12:00:30.000Z", 0.0, 0.02),
        ];
        let densified = GapDensifier::new(1000.0).densify(&track);

        assert_eq!(densified.len(), 4);
        assert_eq!(densified[0], track[0]);
        assert_eq!(densified[3], track[1]);
        assert!((densified[1].longitude - 0.02 / 3.0).abs() < 1e-12);
        assert!((densified[2].longitude - 0.04 / 3.0).abs() < 1e-12);
        assert_eq!(densified[1].timestamp, "2024-05-01T12:00:10.000Z");
    }

    #[test]
    fn test_identical_points_are_not_densified() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 25.0, -80.0),
            sample_fix("2024-05-01T12:00:01.000Z", 25.0, -80.0),
        ];
        assert_eq!(GapDensifier::new(1000.0).densify(&track).len(), 2);
    }

    #[test]
    fn test_originals_kept_in_order_and_spacing_bounded() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 40.0, -74.0),
            sample_fix("2024-05-01T12:01:00.000Z", 40.001, -74.001),
            sample_fix("2024-05-01T12:05:00.000Z", 40.3, -73.5),
            sample_fix("2024-05-01T12:20:00.000Z", 41.2, -71.9),
            sample_fix("2024-05-01T12:20:05.000Z", 41.2005, -71.9),
        ];
        let max = 1000.0;
        let densified = GapDensifier::new(max).densify(&track);

        let mut cursor = 0;
        for original in &track {
            let pos = densified[cursor..]
                .iter()
                .position(|f| f == original)
                .expect("original fix missing from densified track");
            cursor += pos + 1;
        }

        // interpolation is linear in lat/lon, so sub-legs drift slightly off d / n
        for pair in densified.windows(2) {
            assert!(fix_distance(&pair[0], &pair[1]) <= max * 1.01);
        }
        assert!(densified.len() > track.len());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let track = vec![
            sample_fix("2024-05-01T12:00:00.000Z", 0.0, 0.0),
            sample_fix("2024-05-01T12:10:00.000Z", 0.0, 1.0),
        ];
        let before = track.clone();
        let _ = GapDensifier::new(500.0).densify(&track);
        assert_eq!(track, before);
    }
}
