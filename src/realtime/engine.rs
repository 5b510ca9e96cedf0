use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error::RealtimeError;
use super::session::{CorrectionKind, SessionStatus};
use super::store::SessionStore;
use super::window::LandmarkFrame;
use crate::classifier::{ModelChoice, Prediction, SignClassifier};
use crate::config::RealtimeConfig;
use crate::notify::{SignUpdate, SignUpdateMessage, UpdateSink};

/// Orchestrates the per-session streaming pipeline.
///
/// Every inbound frame runs through both detectors; classification
/// results above the confidence threshold mutate session text and fan out
/// as update events. Classifier failures are contained here and reported
/// as structured errors, never panics.
pub struct RealtimeEngine {
    store: SessionStore,
    classifier: Arc<dyn SignClassifier>,
    notifier: Option<Arc<dyn UpdateSink>>,
    config: RealtimeConfig,
}

impl RealtimeEngine {
    pub fn new(
        config: RealtimeConfig,
        classifier: Arc<dyn SignClassifier>,
        notifier: Option<Arc<dyn UpdateSink>>,
    ) -> Self {
        if notifier.is_none() {
            warn!("Realtime engine running without a notifier; updates will be dropped");
        }

        Self {
            store: SessionStore::new(config.clone()),
            classifier,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create (or reset) a session, generating an id when none is given.
    pub async fn create_session(&self, user_id: Option<String>) -> String {
        let session_id = user_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.store.create(&session_id).await;
        session_id
    }

    /// End a session: flush the in-progress word into the text, remove
    /// the session, and return the final text.
    pub async fn end_session(&self, session_id: &str) -> Result<String, RealtimeError> {
        let session = self
            .store
            .remove(session_id)
            .await
            .ok_or_else(|| RealtimeError::SessionNotFound(session_id.to_string()))?;

        let mut session = session.lock().await;
        if let Some(update) = session.complete_word(None) {
            self.publish(session_id, update).await;
        }

        info!("Session ended: {}", session_id);

        Ok(session.full_text.clone())
    }

    /// Read-only snapshot; deliberately does not refresh the inactivity
    /// timer, so polling status cannot keep an abandoned session alive.
    pub async fn session_status(&self, session_id: &str) -> Result<SessionStatus, RealtimeError> {
        let session = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| RealtimeError::SessionNotFound(session_id.to_string()))?;

        let session = session.lock().await;
        Ok(session.status())
    }

    /// Process one landmark frame.
    ///
    /// The stability and motion checks both run on every frame; a single
    /// frame can emit a letter and complete a word.
    pub async fn process_frame(
        &self,
        session_id: &str,
        landmarks: LandmarkFrame,
    ) -> Result<(), RealtimeError> {
        if landmarks.is_empty() {
            return Err(RealtimeError::InvalidInput(
                "empty landmark frame".to_string(),
            ));
        }

        let session = self.store.get_or_create(session_id).await;
        let mut session = session.lock().await;

        if session.stability.observe(landmarks.clone(), &self.config) {
            let prediction = self
                .classifier
                .classify_static(&landmarks)
                .await
                .map_err(|e| RealtimeError::Classification(e.to_string()))?;

            if prediction.confidence > self.config.confidence_threshold {
                if let Some(update) = session.append_letter(&prediction.class) {
                    self.publish(session_id, update).await;
                }
            }
        }

        let edges = session.motion.observe(landmarks, &self.config);
        if edges.ending {
            // Drain before classifying so the next gesture starts from an
            // empty window whatever the outcome
            let sequence = session.motion.drain();

            let prediction = self
                .classifier
                .classify_dynamic(&sequence, ModelChoice::default())
                .await
                .map_err(|e| RealtimeError::Classification(e.to_string()))?;

            if prediction.confidence > self.config.confidence_threshold {
                if let Some(update) = session.complete_word(Some(&prediction.class)) {
                    self.publish(session_id, update).await;
                }
            }
        }

        Ok(())
    }

    /// Classify a pre-bounded gesture sequence, bypassing both detectors.
    ///
    /// Returns the raw prediction whether or not it cleared the
    /// confidence gate.
    pub async fn process_sequence(
        &self,
        session_id: &str,
        sequence: Vec<LandmarkFrame>,
        model: ModelChoice,
    ) -> Result<Prediction, RealtimeError> {
        if sequence.is_empty() {
            return Err(RealtimeError::InvalidInput(
                "empty landmark sequence".to_string(),
            ));
        }

        let session = self.store.get_or_create(session_id).await;
        let mut session = session.lock().await;

        let prediction = self
            .classifier
            .classify_dynamic(&sequence, model)
            .await
            .map_err(|e| RealtimeError::Classification(e.to_string()))?;

        if prediction.confidence > self.config.confidence_threshold {
            if let Some(update) = session.complete_word(Some(&prediction.class)) {
                self.publish(session_id, update).await;
            }
        }

        Ok(prediction)
    }

    /// Apply an out-of-band correction to a session's text.
    pub async fn correct(
        &self,
        session_id: &str,
        kind: CorrectionKind,
        value: Option<&str>,
    ) -> Result<SessionStatus, RealtimeError> {
        let session = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| RealtimeError::SessionNotFound(session_id.to_string()))?;

        let mut session = session.lock().await;
        let update = session.apply_correction(kind, value)?;
        session.touch();

        let status = session.status();
        self.publish(session_id, update).await;

        Ok(status)
    }

    /// Remove sessions idle past the configured timeout. Called by the
    /// background sweep task.
    pub async fn sweep_expired(&self) -> usize {
        self.store
            .sweep(
                Utc::now(),
                Duration::seconds(self.config.session_timeout_secs as i64),
            )
            .await
    }

    /// Fire-and-forget fan-out. Frame processing and corrections must
    /// succeed even when nobody is listening, so failures are logged and
    /// swallowed.
    async fn publish(&self, session_id: &str, update: SignUpdate) {
        let Some(notifier) = &self.notifier else {
            warn!(
                "No notifier attached; dropping update for session {}",
                session_id
            );
            return;
        };

        let message = SignUpdateMessage::now(session_id, update);
        if let Err(e) = notifier.publish(&message).await {
            error!("Failed to publish update for session {}: {}", session_id, e);
        }
    }
}
