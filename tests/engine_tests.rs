use anyhow::Result;
use async_trait::async_trait;
use signtext::classifier::{ModelChoice, Prediction, SignClassifier, StubClassifier};
use signtext::config::RealtimeConfig;
use signtext::notify::{SignUpdate, SignUpdateMessage, UpdateSink};
use signtext::realtime::{CorrectionKind, RealtimeEngine, RealtimeError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Captures published updates instead of sending them anywhere.
#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<SignUpdateMessage>>,
}

#[async_trait]
impl UpdateSink for RecordingSink {
    async fn publish(&self, message: &SignUpdateMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        Ok(())
    }
}

/// Classifier that always errors, for failure-containment tests.
struct FailingClassifier;

#[async_trait]
impl SignClassifier for FailingClassifier {
    async fn classify_static(&self, _landmarks: &[f32]) -> Result<Prediction> {
        anyhow::bail!("model backend unavailable")
    }

    async fn classify_dynamic(
        &self,
        _sequence: &[Vec<f32>],
        _model: ModelChoice,
    ) -> Result<Prediction> {
        anyhow::bail!("model backend unavailable")
    }
}

/// Classifier whose confidence never clears the gate.
struct LowConfidenceClassifier;

#[async_trait]
impl SignClassifier for LowConfidenceClassifier {
    async fn classify_static(&self, _landmarks: &[f32]) -> Result<Prediction> {
        Ok(Prediction {
            class: "A".to_string(),
            confidence: 0.4,
            index: 0,
        })
    }

    async fn classify_dynamic(
        &self,
        _sequence: &[Vec<f32>],
        _model: ModelChoice,
    ) -> Result<Prediction> {
        Ok(Prediction {
            class: "Halo".to_string(),
            confidence: 0.4,
            index: 11,
        })
    }
}

fn engine_with_sink(
    classifier: Arc<dyn SignClassifier>,
) -> (RealtimeEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let engine = RealtimeEngine::new(
        RealtimeConfig::default(),
        classifier,
        Some(Arc::clone(&sink) as Arc<dyn UpdateSink>),
    );
    (engine, sink)
}

fn still_frame(value: f32) -> Vec<f32> {
    vec![value; 63]
}

/// Feed a gesture: a couple of still frames, `moving` frames of large
/// displacement, then one still frame that ends the motion.
async fn feed_gesture(engine: &RealtimeEngine, session_id: &str, moving: usize) {
    engine
        .process_frame(session_id, still_frame(0.0))
        .await
        .unwrap();
    engine
        .process_frame(session_id, still_frame(0.0))
        .await
        .unwrap();

    let mut value = 0.0_f32;
    for _ in 0..moving {
        value += 0.05;
        engine
            .process_frame(session_id, still_frame(value))
            .await
            .unwrap();
    }

    engine
        .process_frame(session_id, still_frame(value))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_held_pose_emits_one_letter() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    for _ in 0..6 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.current_word, "A");
    assert_eq!(status.last_letter.as_deref(), Some("A"));

    let messages = sink.messages.lock().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].session_id, "u1");
    assert!(matches!(
        &messages[0].update,
        SignUpdate::Letter { letter, current_word, .. }
            if letter == "A" && current_word == "A"
    ));
}

#[tokio::test]
async fn test_no_letter_before_stability_dwell() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    // Frame 1 seeds the window; frames 2-5 only reach 4 consecutive
    // stable frames, one short of the default threshold
    for _ in 0..5 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.current_word, "");
    assert!(sink.messages.lock().await.is_empty());
}

#[tokio::test]
async fn test_held_pose_is_not_emitted_twice() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    // Well past the dwell threshold; every extra frame re-classifies to
    // the same letter, which must be deduplicated
    for _ in 0..15 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.current_word, "A");
    assert_eq!(sink.messages.lock().await.len(), 1);
}

#[tokio::test]
async fn test_gesture_completes_word() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    feed_gesture(&engine, "u1", 18).await;

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.full_text, "Halo");
    assert_eq!(status.last_word.as_deref(), Some("Halo"));

    let messages = sink.messages.lock().await;
    let words: Vec<_> = messages
        .iter()
        .filter(|m| matches!(m.update, SignUpdate::Word { .. }))
        .collect();
    assert_eq!(words.len(), 1);
}

#[tokio::test]
async fn test_short_motion_blip_is_discarded() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    // 5 moving frames stay below the 15-frame gesture minimum
    feed_gesture(&engine, "u1", 5).await;

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.full_text, "");
    assert!(!sink
        .messages
        .lock()
        .await
        .iter()
        .any(|m| matches!(m.update, SignUpdate::Word { .. })));
}

#[tokio::test]
async fn test_low_confidence_mutates_nothing() {
    let (engine, sink) = engine_with_sink(Arc::new(LowConfidenceClassifier));
    engine.create_session(Some("u1".to_string())).await;

    for _ in 0..10 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.current_word, "");
    assert!(sink.messages.lock().await.is_empty());
}

#[tokio::test]
async fn test_sequence_roundtrip_reflects_word_in_status() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));
    let session_id = engine.create_session(None).await;

    let sequence = vec![still_frame(0.1); 20];
    let prediction = engine
        .process_sequence(&session_id, sequence, ModelChoice::default())
        .await
        .unwrap();

    assert_eq!(prediction.class, "Halo");
    assert!(prediction.confidence > 0.7);

    let status = engine.session_status(&session_id).await.unwrap();
    assert_eq!(status.full_text, "Halo");
}

#[tokio::test]
async fn test_sequence_below_confidence_still_returns_prediction() {
    let (engine, _sink) = engine_with_sink(Arc::new(LowConfidenceClassifier));
    engine.create_session(Some("u1".to_string())).await;

    let prediction = engine
        .process_sequence("u1", vec![still_frame(0.1); 20], ModelChoice::Lstm)
        .await
        .unwrap();

    assert_eq!(prediction.class, "Halo");

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.full_text, "");
}

#[tokio::test]
async fn test_empty_frame_is_invalid_and_creates_no_session() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));

    let err = engine.process_frame("ghost", Vec::new()).await.unwrap_err();
    assert!(matches!(err, RealtimeError::InvalidInput(_)));
    assert_eq!(engine.store().len().await, 0);
}

#[tokio::test]
async fn test_classifier_failure_is_contained() {
    let (engine, sink) = engine_with_sink(Arc::new(FailingClassifier));
    engine.create_session(Some("u1".to_string())).await;

    for i in 0..6 {
        let result = engine.process_frame("u1", still_frame(0.5)).await;
        if i < 5 {
            result.unwrap();
        } else {
            // Frame 6 reaches stability and hits the broken classifier
            let err = result.unwrap_err();
            assert!(matches!(err, RealtimeError::Classification(_)));
        }
    }

    // The session survives the failure and no update was published
    assert!(engine.session_status("u1").await.is_ok());
    assert!(sink.messages.lock().await.is_empty());
}

#[tokio::test]
async fn test_correct_word_replaces_last_word() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    {
        let session = engine.store().get("u1").await.unwrap();
        session.lock().await.full_text = "HALO APA".to_string();
    }

    let status = engine
        .correct("u1", CorrectionKind::Word, Some("KABAR"))
        .await
        .unwrap();

    assert_eq!(status.full_text, "HALO KABAR");
    assert!(matches!(
        &sink.messages.lock().await[0].update,
        SignUpdate::Correction { full_text, .. } if full_text == "HALO KABAR"
    ));
}

#[tokio::test]
async fn test_clear_text_after_completed_word() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    engine
        .process_sequence("u1", vec![still_frame(0.1); 20], ModelChoice::default())
        .await
        .unwrap();

    let status = engine
        .correct("u1", CorrectionKind::ClearText, None)
        .await
        .unwrap();

    assert_eq!(status.full_text, "");
    assert_eq!(status.current_word, "");
}

#[tokio::test]
async fn test_correct_unknown_session_is_not_found() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));

    let err = engine
        .correct("ghost", CorrectionKind::ClearWord, None)
        .await
        .unwrap_err();

    assert!(matches!(err, RealtimeError::SessionNotFound(_)));
}

#[tokio::test]
async fn test_end_session_flushes_pending_word() {
    let (engine, sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    for _ in 0..6 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let full_text = engine.end_session("u1").await.unwrap();
    assert_eq!(full_text, "A");

    // Flushing published a word event
    assert!(sink
        .messages
        .lock()
        .await
        .iter()
        .any(|m| matches!(&m.update, SignUpdate::Word { word, .. } if word == "A")));

    // The session is gone
    let err = engine.session_status("u1").await.unwrap_err();
    assert!(matches!(err, RealtimeError::SessionNotFound(_)));
}

#[tokio::test]
async fn test_end_unknown_session_is_not_found_and_creates_nothing() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));

    let err = engine.end_session("never-created").await.unwrap_err();
    assert!(matches!(err, RealtimeError::SessionNotFound(_)));
    assert_eq!(engine.store().len().await, 0);
}

#[tokio::test]
async fn test_create_session_generates_id_when_absent() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));

    let id = engine.create_session(None).await;
    assert!(!id.is_empty());
    assert!(engine.session_status(&id).await.is_ok());
}

#[tokio::test]
async fn test_expired_session_is_swept() {
    let (engine, _sink) = engine_with_sink(Arc::new(StubClassifier));
    engine.create_session(Some("u1".to_string())).await;

    {
        let session = engine.store().get("u1").await.unwrap();
        session.lock().await.last_activity =
            chrono::Utc::now() - chrono::Duration::seconds(3601);
    }

    let removed = engine.sweep_expired().await;
    assert_eq!(removed, 1);

    let err = engine.session_status("u1").await.unwrap_err();
    assert!(matches!(err, RealtimeError::SessionNotFound(_)));
}

#[tokio::test]
async fn test_engine_without_notifier_still_processes() {
    let engine = RealtimeEngine::new(
        RealtimeConfig::default(),
        Arc::new(StubClassifier),
        None,
    );
    engine.create_session(Some("u1".to_string())).await;

    for _ in 0..6 {
        engine
            .process_frame("u1", still_frame(0.5))
            .await
            .unwrap();
    }

    let status = engine.session_status("u1").await.unwrap();
    assert_eq!(status.current_word, "A");
}
