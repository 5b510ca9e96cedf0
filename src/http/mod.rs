//! HTTP API server for clients streaming hand landmarks
//!
//! This module provides the REST surface over the realtime engine:
//! - POST /api/realtime/session/create - Create or reset a session
//! - POST /api/realtime/session/end - End a session, returning its text
//! - GET  /api/realtime/session/:id/status - Query session text state
//! - POST /api/realtime/landmarks - Submit one landmark frame
//! - POST /api/realtime/landmark-sequence - Submit a bounded gesture
//! - POST /api/realtime/correction - Correct the assembled text
//! plus the stateless classifier routes (predict, vocabulary,
//! text-to-sign, model status) and a health check.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
