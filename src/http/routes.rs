use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Realtime session lifecycle
        .route(
            "/api/realtime/session/create",
            post(handlers::create_session),
        )
        .route("/api/realtime/session/end", post(handlers::end_session))
        .route(
            "/api/realtime/session/:session_id/status",
            get(handlers::session_status),
        )
        // Realtime frame/sequence ingestion
        .route("/api/realtime/landmarks", post(handlers::process_landmarks))
        .route(
            "/api/realtime/landmark-sequence",
            post(handlers::process_landmark_sequence),
        )
        .route(
            "/api/realtime/correction",
            post(handlers::correct_prediction),
        )
        // Stateless classifier surface
        .route(
            "/api/predict-static-sign",
            post(handlers::predict_static_sign),
        )
        .route(
            "/api/predict-dynamic-sign",
            post(handlers::predict_dynamic_sign),
        )
        .route("/api/available-letters", get(handlers::available_letters))
        .route("/api/available-words", get(handlers::available_words))
        .route("/api/text-to-sign", post(handlers::text_to_sign))
        .route("/api/model/status", get(handlers::model_status))
        // Browser clients post landmarks cross-origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
