//! Realtime sign-to-text core
//!
//! This module turns a per-session stream of hand-landmark frames into
//! accumulating text:
//! - Stability detection: a pose held still for several consecutive
//!   frames is classified as a letter (fingerspelling)
//! - Motion segmentation: the span between a motion start and end is
//!   classified as a whole-word gesture
//! - Text assembly: letters build the in-progress word, completed words
//!   join the full text, corrections edit either
//! - Session store: shared id → session map with idle expiry

pub mod engine;
pub mod error;
pub mod motion;
pub mod session;
pub mod stability;
pub mod store;
pub mod window;

pub use engine::RealtimeEngine;
pub use error::RealtimeError;
pub use motion::{MotionEdges, MotionSegmenter};
pub use session::{CorrectionKind, SessionStatus, SignSession};
pub use stability::StabilityDetector;
pub use store::{SessionStore, SharedSession};
pub use window::{FrameWindow, LandmarkFrame};
