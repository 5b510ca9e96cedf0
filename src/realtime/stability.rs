use super::window::{mean_abs_diff, FrameWindow, LandmarkFrame};
use crate::config::RealtimeConfig;

/// Detects when a hand pose is being held still.
///
/// Keeps a short rolling window of recent frames and counts consecutive
/// low-movement frames. A pose only counts as stable once it has been held
/// for `stable_frame_threshold` frames in a row, so single-frame jitter
/// never triggers a letter classification.
#[derive(Debug)]
pub struct StabilityDetector {
    window: FrameWindow,
    stable_frames: u32,
}

impl StabilityDetector {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: FrameWindow::new(capacity),
            stable_frames: 0,
        }
    }

    /// Feed one frame, returning whether the pose is now stable enough to
    /// attempt a static-sign classification.
    pub fn observe(&mut self, frame: LandmarkFrame, config: &RealtimeConfig) -> bool {
        let Some(previous) = self.window.newest() else {
            // No history to compare against yet
            self.window.push(frame);
            return false;
        };

        let movement = mean_abs_diff(&frame, previous);
        self.window.push(frame);

        if movement < config.movement_threshold {
            self.stable_frames += 1;
        } else {
            self.stable_frames = 0;
        }

        self.stable_frames >= config.stable_frame_threshold
    }

    pub fn stable_frames(&self) -> u32 {
        self.stable_frames
    }
}
