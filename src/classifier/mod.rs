//! Classifier port
//!
//! The core treats landmark-to-class classification as an opaque scoring
//! capability behind the `SignClassifier` trait. The bundled
//! `StubClassifier` stands in for the real models; a trained model can be
//! dropped in without touching the realtime engine.

pub mod stub;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use stub::StubClassifier;

/// Result of classifying a landmark frame or sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub confidence: f32,
    pub index: usize,
}

/// Which dynamic-sign model to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    Lstm,
    #[default]
    Transformer,
}

/// Scores landmarks against the sign vocabulary.
#[async_trait]
pub trait SignClassifier: Send + Sync {
    /// Classify a single held pose as a letter.
    async fn classify_static(&self, landmarks: &[f32]) -> Result<Prediction>;

    /// Classify a bounded gesture sequence as a word.
    async fn classify_dynamic(
        &self,
        sequence: &[Vec<f32>],
        model: ModelChoice,
    ) -> Result<Prediction>;
}
