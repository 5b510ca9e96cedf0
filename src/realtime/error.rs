use thiserror::Error;

/// Failures surfaced by the realtime engine.
///
/// `SessionNotFound` and `InvalidInput` cause no session mutation.
/// `Classification` wraps a classifier port failure caught at the
/// orchestration boundary; frame submission is high-frequency, so a bad
/// classification must never take down request handling.
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("classification failed: {0}")]
    Classification(String),
}
