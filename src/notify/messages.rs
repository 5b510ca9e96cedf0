use serde::{Deserialize, Serialize};

/// Incremental text update produced by the realtime engine.
///
/// Serialized with a `type` tag and camelCase fields, which is the wire
/// shape subscribers see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignUpdate {
    /// A letter was appended to the in-progress word.
    #[serde(rename_all = "camelCase")]
    Letter {
        letter: String,
        current_word: String,
        full_text: String,
    },

    /// A word was completed and appended to the full text.
    #[serde(rename_all = "camelCase")]
    Word { word: String, full_text: String },

    /// A manual correction changed the session text.
    #[serde(rename_all = "camelCase")]
    Correction {
        current_word: String,
        full_text: String,
    },
}

/// Envelope published to a session's update topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpdateMessage {
    pub session_id: String,
    pub timestamp: String, // RFC3339 timestamp

    #[serde(flatten)]
    pub update: SignUpdate,
}

impl SignUpdateMessage {
    /// Stamp an update with the current time.
    pub fn now(session_id: impl Into<String>, update: SignUpdate) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            update,
        }
    }
}
