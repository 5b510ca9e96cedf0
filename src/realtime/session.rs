use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RealtimeError;
use super::motion::MotionSegmenter;
use super::stability::StabilityDetector;
use crate::config::RealtimeConfig;
use crate::notify::SignUpdate;

/// Manual correction applied to session text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrectionKind {
    /// Replace the final character of the in-progress word.
    Letter,
    /// Replace the last completed word of the full text.
    Word,
    /// Discard the in-progress word.
    ClearWord,
    /// Discard everything.
    ClearText,
}

/// Read-only snapshot of a session's text state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub session_id: String,
    pub current_word: String,
    pub full_text: String,
    pub last_letter: Option<String>,
    pub last_word: Option<String>,
}

/// Per-signer streaming state: detector windows plus accumulated text.
///
/// Mutation methods return the `SignUpdate` event they produced (if any);
/// publishing is the engine's job, keeping text assembly synchronous and
/// independently testable.
#[derive(Debug)]
pub struct SignSession {
    pub id: String,
    pub stability: StabilityDetector,
    pub motion: MotionSegmenter,
    pub last_letter: Option<String>,
    pub last_word: Option<String>,
    pub current_word: String,
    pub full_text: String,
    pub last_activity: DateTime<Utc>,
}

impl SignSession {
    pub fn new(id: impl Into<String>, config: &RealtimeConfig) -> Self {
        Self {
            id: id.into(),
            stability: StabilityDetector::new(config.static_window_frames),
            motion: MotionSegmenter::new(config.dynamic_window_frames),
            last_letter: None,
            last_word: None,
            current_word: String::new(),
            full_text: String::new(),
            last_activity: Utc::now(),
        }
    }

    /// Refresh the inactivity timer.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Append a classified letter to the in-progress word.
    ///
    /// A held pose keeps classifying to the same letter frame after frame,
    /// so consecutive repeats are suppressed.
    pub fn append_letter(&mut self, letter: &str) -> Option<SignUpdate> {
        if self.last_letter.as_deref() == Some(letter) {
            return None;
        }

        self.last_letter = Some(letter.to_string());
        self.current_word.push_str(letter);

        Some(SignUpdate::Letter {
            letter: letter.to_string(),
            current_word: self.current_word.clone(),
            full_text: self.full_text.clone(),
        })
    }

    /// Append a completed word to the full text.
    ///
    /// Falls back to the in-progress fingerspelled word when no word is
    /// supplied; a no-op when both are empty.
    pub fn complete_word(&mut self, word: Option<&str>) -> Option<SignUpdate> {
        let word_to_add = match word {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => self.current_word.clone(),
        };

        if word_to_add.is_empty() {
            return None;
        }

        if !self.full_text.is_empty() {
            self.full_text.push(' ');
        }
        self.full_text.push_str(&word_to_add);
        self.last_word = Some(word_to_add.clone());
        self.current_word.clear();

        Some(SignUpdate::Word {
            word: word_to_add,
            full_text: self.full_text.clone(),
        })
    }

    /// Apply an out-of-band correction to the session text.
    pub fn apply_correction(
        &mut self,
        kind: CorrectionKind,
        value: Option<&str>,
    ) -> Result<SignUpdate, RealtimeError> {
        match kind {
            CorrectionKind::Letter => {
                let value = require_value(kind, value)?;
                if !self.current_word.is_empty() {
                    self.current_word.pop();
                    self.current_word.push_str(value);
                }
            }
            CorrectionKind::Word => {
                let value = require_value(kind, value)?;
                match self.full_text.rfind(' ') {
                    Some(idx) => {
                        self.full_text.truncate(idx + 1);
                        self.full_text.push_str(value);
                    }
                    // At most one word so far; replace it outright
                    None => self.full_text = value.to_string(),
                }
            }
            CorrectionKind::ClearWord => {
                self.current_word.clear();
            }
            CorrectionKind::ClearText => {
                self.full_text.clear();
                self.current_word.clear();
            }
        }

        Ok(SignUpdate::Correction {
            current_word: self.current_word.clone(),
            full_text: self.full_text.clone(),
        })
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            session_id: self.id.clone(),
            current_word: self.current_word.clone(),
            full_text: self.full_text.clone(),
            last_letter: self.last_letter.clone(),
            last_word: self.last_word.clone(),
        }
    }
}

fn require_value<'a>(
    kind: CorrectionKind,
    value: Option<&'a str>,
) -> Result<&'a str, RealtimeError> {
    value.ok_or_else(|| {
        RealtimeError::InvalidInput(format!("correction kind {:?} requires a value", kind))
    })
}
