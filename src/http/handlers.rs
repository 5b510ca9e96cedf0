use super::state::AppState;
use crate::classifier::{stub, ModelChoice, Prediction};
use crate::realtime::{CorrectionKind, RealtimeError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Optional caller-supplied session id (a UUID is generated otherwise)
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionResponse {
    pub session_id: String,
    pub full_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessLandmarksRequest {
    pub session_id: String,
    pub landmarks: Vec<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedResponse {
    pub accepted: bool,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSequenceRequest {
    pub session_id: String,
    pub landmark_sequence: Vec<Vec<f32>>,
    pub model_choice: Option<ModelChoice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResponse {
    pub accepted: bool,
    pub session_id: String,
    pub result: Prediction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub session_id: String,
    pub correction_type: CorrectionKind,
    pub correction: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    pub session_id: String,
    pub current_word: String,
    pub full_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictStaticRequest {
    pub landmarks: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictDynamicRequest {
    pub landmark_sequence: Vec<Vec<f32>>,
    pub model_choice: Option<ModelChoice>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub result: Prediction,
}

#[derive(Debug, Deserialize)]
pub struct TextToSignRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct LettersResponse {
    pub count: usize,
    pub letters: Vec<stub::LetterEntry>,
}

#[derive(Debug, Serialize)]
pub struct WordsResponse {
    pub count: usize,
    pub words: Vec<stub::WordEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: RealtimeError) -> Response {
    let status = match err {
        RealtimeError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        RealtimeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RealtimeError::Classification(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Realtime session handlers
// ============================================================================

/// POST /api/realtime/session/create
/// Create a new session (or reset an existing one)
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> impl IntoResponse {
    let user_id = body.and_then(|Json(req)| req.user_id);
    let session_id = state.engine.create_session(user_id).await;

    info!("Realtime session created: {}", session_id);

    (StatusCode::OK, Json(CreateSessionResponse { session_id }))
}

/// POST /api/realtime/session/end
/// End a session and return its final text
pub async fn end_session(
    State(state): State<AppState>,
    Json(req): Json<EndSessionRequest>,
) -> Response {
    match state.engine.end_session(&req.session_id).await {
        Ok(full_text) => (
            StatusCode::OK,
            Json(EndSessionResponse {
                session_id: req.session_id,
                full_text,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to end session {}: {}", req.session_id, e);
            error_response(e)
        }
    }
}

/// GET /api/realtime/session/:session_id/status
/// Snapshot of a session's text state
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.engine.session_status(&session_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/realtime/landmarks
/// Feed one landmark frame into a session
pub async fn process_landmarks(
    State(state): State<AppState>,
    Json(req): Json<ProcessLandmarksRequest>,
) -> Response {
    match state
        .engine
        .process_frame(&req.session_id, req.landmarks)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(AcceptedResponse {
                accepted: true,
                session_id: req.session_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error processing landmarks for {}: {}", req.session_id, e);
            error_response(e)
        }
    }
}

/// POST /api/realtime/landmark-sequence
/// Feed a pre-bounded gesture sequence into a session
pub async fn process_landmark_sequence(
    State(state): State<AppState>,
    Json(req): Json<ProcessSequenceRequest>,
) -> Response {
    let model = req.model_choice.unwrap_or_default();

    match state
        .engine
        .process_sequence(&req.session_id, req.landmark_sequence, model)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(SequenceResponse {
                accepted: true,
                session_id: req.session_id,
                result,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(
                "Error processing landmark sequence for {}: {}",
                req.session_id, e
            );
            error_response(e)
        }
    }
}

/// POST /api/realtime/correction
/// Apply a manual correction to a session's text
pub async fn correct_prediction(
    State(state): State<AppState>,
    Json(req): Json<CorrectionRequest>,
) -> Response {
    match state
        .engine
        .correct(&req.session_id, req.correction_type, req.correction.as_deref())
        .await
    {
        Ok(status) => (
            StatusCode::OK,
            Json(CorrectionResponse {
                session_id: req.session_id,
                current_word: status.current_word,
                full_text: status.full_text,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error processing correction for {}: {}", req.session_id, e);
            error_response(e)
        }
    }
}

// ============================================================================
// Stateless classifier handlers
// ============================================================================

/// POST /api/predict-static-sign
/// Classify a single frame without any session state
pub async fn predict_static_sign(
    State(state): State<AppState>,
    Json(req): Json<PredictStaticRequest>,
) -> Response {
    if req.landmarks.is_empty() {
        return error_response(RealtimeError::InvalidInput(
            "no landmarks data provided".to_string(),
        ));
    }

    info!("Received landmarks with {} elements", req.landmarks.len());

    match state.classifier.classify_static(&req.landmarks).await {
        Ok(result) => (StatusCode::OK, Json(PredictionResponse { result })).into_response(),
        Err(e) => {
            error!("Error in static sign prediction: {}", e);
            error_response(RealtimeError::Classification(e.to_string()))
        }
    }
}

/// POST /api/predict-dynamic-sign
/// Classify a gesture sequence without any session state
pub async fn predict_dynamic_sign(
    State(state): State<AppState>,
    Json(req): Json<PredictDynamicRequest>,
) -> Response {
    if req.landmark_sequence.is_empty() {
        return error_response(RealtimeError::InvalidInput(
            "no landmark sequence data provided".to_string(),
        ));
    }

    info!(
        "Received landmark sequence with {} frames",
        req.landmark_sequence.len()
    );

    let model = req.model_choice.unwrap_or_default();

    match state
        .classifier
        .classify_dynamic(&req.landmark_sequence, model)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(PredictionResponse { result })).into_response(),
        Err(e) => {
            error!("Error in dynamic sign prediction: {}", e);
            error_response(RealtimeError::Classification(e.to_string()))
        }
    }
}

/// GET /api/available-letters
pub async fn available_letters() -> impl IntoResponse {
    let letters = stub::available_letters();

    (
        StatusCode::OK,
        Json(LettersResponse {
            count: letters.len(),
            letters,
        }),
    )
}

/// GET /api/available-words
pub async fn available_words() -> impl IntoResponse {
    let words = stub::available_words();

    (
        StatusCode::OK,
        Json(WordsResponse {
            count: words.len(),
            words,
        }),
    )
}

/// POST /api/text-to-sign
/// Break text into dynamic signs and fingerspelled words
pub async fn text_to_sign(Json(req): Json<TextToSignRequest>) -> Response {
    if req.text.trim().is_empty() {
        return error_response(RealtimeError::InvalidInput(
            "no text provided".to_string(),
        ));
    }

    (StatusCode::OK, Json(stub::text_to_sign(&req.text))).into_response()
}

/// GET /api/model/status
pub async fn model_status() -> impl IntoResponse {
    (StatusCode::OK, Json(stub::model_status()))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
