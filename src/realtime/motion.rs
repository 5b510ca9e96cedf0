use super::window::{mean_abs_diff, FrameWindow, LandmarkFrame};
use crate::config::RealtimeConfig;

/// Motion state edges reported for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionEdges {
    /// The hand was still and has started moving.
    pub starting: bool,
    /// The hand was moving and has come to rest with enough buffered
    /// frames to form a gesture.
    pub ending: bool,
}

/// Segments word gestures out of the frame stream.
///
/// Keeps a longer rolling window than the stability detector (roughly one
/// second at 30 fps) and tracks the moving/still transition. The `ending`
/// edge bounds a gesture and is the sole trigger for dynamic-sign
/// classification; motion blips shorter than `min_sequence_frames` are
/// discarded as noise.
#[derive(Debug)]
pub struct MotionSegmenter {
    window: FrameWindow,
    in_motion: bool,
}

impl MotionSegmenter {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: FrameWindow::new(capacity),
            in_motion: false,
        }
    }

    /// Feed one frame, returning the motion edges it produced.
    pub fn observe(&mut self, frame: LandmarkFrame, config: &RealtimeConfig) -> MotionEdges {
        let Some(previous) = self.window.newest() else {
            self.window.push(frame);
            return MotionEdges::default();
        };

        let movement = mean_abs_diff(&frame, previous);
        self.window.push(frame);

        let moving = movement > config.motion_threshold;
        let was_in_motion = self.in_motion;
        self.in_motion = moving;

        MotionEdges {
            starting: moving && !was_in_motion,
            ending: !moving
                && was_in_motion
                && self.window.len() > config.min_sequence_frames,
        }
    }

    /// Take the buffered gesture frames, leaving the window empty so the
    /// next gesture starts from scratch.
    pub fn drain(&mut self) -> Vec<LandmarkFrame> {
        self.window.drain()
    }

    pub fn in_motion(&self) -> bool {
        self.in_motion
    }

    pub fn buffered_frames(&self) -> usize {
        self.window.len()
    }
}
