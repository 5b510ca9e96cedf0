use std::collections::VecDeque;
use tracing::warn;

/// A landmark frame: the flattened (x, y, z) coordinates of one hand pose.
pub type LandmarkFrame = Vec<f32>;

/// Mean absolute per-index difference between two frames.
///
/// Frames of mismatched length are compared over the overlapping index
/// range; the denominator is the incoming frame's length. Mismatches are
/// logged so malformed clients stay visible.
pub fn mean_abs_diff(current: &[f32], previous: &[f32]) -> f32 {
    if current.len() != previous.len() {
        warn!(
            "Landmark frame length changed: {} -> {}. Comparing overlapping range.",
            previous.len(),
            current.len()
        );
    }

    let overlap = current.len().min(previous.len());
    let diff_sum: f32 = current[..overlap]
        .iter()
        .zip(&previous[..overlap])
        .map(|(a, b)| (a - b).abs())
        .sum();

    diff_sum / current.len() as f32
}

/// Fixed-capacity ring buffer of landmark frames.
///
/// Frames are appended at the back; once the buffer is full the oldest
/// frame is evicted first. Both detectors keep one of these per session.
#[derive(Debug)]
pub struct FrameWindow {
    frames: VecDeque<LandmarkFrame>,
    capacity: usize,
}

impl FrameWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a frame, evicting the oldest if the window is at capacity.
    pub fn push(&mut self, frame: LandmarkFrame) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// The most recently pushed frame, if any.
    pub fn newest(&self) -> Option<&LandmarkFrame> {
        self.frames.back()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Take all buffered frames out, leaving the window empty.
    pub fn drain(&mut self) -> Vec<LandmarkFrame> {
        self.frames.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
