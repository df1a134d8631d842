/// Two-pass track reconstruction: densify first, then smooth the denser,
/// more evenly spaced result.

use crate::config::ProcessingConfig;
use crate::densifier::GapDensifier;
use crate::flight_data::Fix;
use crate::smoother::MovingAverageSmoother;

#[derive(Debug, Clone, Copy)]
pub struct TrackProcessor {
    densifier: GapDensifier,
    smoother: MovingAverageSmoother,
}

impl TrackProcessor {
    pub fn new(config: ProcessingConfig) -> Self {
        TrackProcessor {
            densifier: GapDensifier::new(config.max_distance_m),
            smoother: MovingAverageSmoother::new(config.window_size),
        }
    }

    pub fn process(&self, track: &[Fix]) -> Vec<Fix> {
        if track.len() < 2 {
            return track.to_vec();
        }

        let densified = self.densifier.densify(track);
        self.smoother.smooth(&densified)
    }
}

impl Default for TrackProcessor {
    fn default() -> Self {
        TrackProcessor::new(ProcessingConfig::default())
    }
}
