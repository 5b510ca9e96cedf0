use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{ModelChoice, Prediction, SignClassifier};

/// Static-sign (letter) class mapping, index-aligned with the model output.
pub const LETTER_CLASSES: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Dynamic-sign (word) class mapping for the BISINDO vocabulary.
pub const WORD_CLASSES: [&str; 12] = [
    "Apa",
    "Apa Kabar",
    "Bagaimana",
    "Baik",
    "Belajar",
    "Berapa",
    "Berdiri",
    "Bingung",
    "Dia",
    "Dimana",
    "Duduk",
    "Halo",
];

#[derive(Debug, Clone, Serialize)]
pub struct LetterEntry {
    pub id: usize,
    pub letter: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordEntry {
    pub id: usize,
    pub word: String,
}

/// Status of the model artifacts backing the classifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelStatus {
    pub landmark_model: bool,
    pub video_lstm_model: bool,
    pub video_transformer_model: bool,
    pub image_class_mapping: bool,
    pub video_class_mapping: bool,
}

/// One unit of a text-to-sign breakdown: either a word with a dynamic sign
/// in the vocabulary, or a word that must be fingerspelled letter by letter.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignStep {
    #[serde(rename_all = "camelCase")]
    Word {
        original: String,
        mapped: String,
        known_in_dataset: bool,
    },
    #[serde(rename_all = "camelCase")]
    Fingerspell {
        original: String,
        letters: Vec<LetterMapping>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct LetterMapping {
    pub letter: String,
    pub mapped: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignBreakdown {
    pub text: String,
    pub signs: Vec<SignStep>,
}

pub fn available_letters() -> Vec<LetterEntry> {
    LETTER_CLASSES
        .iter()
        .enumerate()
        .map(|(id, letter)| LetterEntry {
            id,
            letter: letter.to_string(),
        })
        .collect()
}

pub fn available_words() -> Vec<WordEntry> {
    WORD_CLASSES
        .iter()
        .enumerate()
        .map(|(id, word)| WordEntry {
            id,
            word: word.to_string(),
        })
        .collect()
}

pub fn model_status() -> ModelStatus {
    ModelStatus {
        landmark_model: true,
        video_lstm_model: true,
        video_transformer_model: true,
        image_class_mapping: true,
        video_class_mapping: true,
    }
}

/// Break input text into signs: vocabulary words map to a dynamic sign,
/// everything else is fingerspelled.
pub fn text_to_sign(text: &str) -> SignBreakdown {
    let mut signs = Vec::new();

    for word in text.trim().to_lowercase().split_whitespace() {
        let known = WORD_CLASSES
            .iter()
            .find(|class| class.to_lowercase() == word);

        match known {
            Some(class) => signs.push(SignStep::Word {
                original: word.to_string(),
                mapped: class.to_string(),
                known_in_dataset: true,
            }),
            None => {
                let letters = word
                    .chars()
                    .map(|c| LetterMapping {
                        letter: c.to_string(),
                        mapped: c.to_uppercase().to_string(),
                        exists: c.is_ascii_alphabetic(),
                    })
                    .collect();

                signs.push(SignStep::Fingerspell {
                    original: word.to_string(),
                    letters,
                });
            }
        }
    }

    SignBreakdown {
        text: text.to_string(),
        signs,
    }
}

/// Fixed-answer classifier standing in for the trained models.
///
/// Always reports letter "A" and word "Halo" with high confidence, which
/// is enough to exercise every path of the realtime engine.
pub struct StubClassifier;

#[async_trait]
impl SignClassifier for StubClassifier {
    async fn classify_static(&self, landmarks: &[f32]) -> Result<Prediction> {
        debug!("Classifying static sign ({} landmark values)", landmarks.len());

        Ok(Prediction {
            class: "A".to_string(),
            confidence: 0.95,
            index: 0,
        })
    }

    async fn classify_dynamic(
        &self,
        sequence: &[Vec<f32>],
        model: ModelChoice,
    ) -> Result<Prediction> {
        debug!(
            "Classifying dynamic sign ({} frames, model {:?})",
            sequence.len(),
            model
        );

        Ok(Prediction {
            class: "Halo".to_string(),
            confidence: 0.92,
            index: 11,
        })
    }
}
