pub mod classifier;
pub mod config;
pub mod http;
pub mod notify;
pub mod realtime;

pub use classifier::{ModelChoice, Prediction, SignClassifier, StubClassifier};
pub use config::Config;
pub use http::{create_router, AppState};
pub use notify::{NatsNotifier, SignUpdate, SignUpdateMessage, UpdateSink};
pub use realtime::{
    CorrectionKind, LandmarkFrame, RealtimeEngine, RealtimeError, SessionStatus, SessionStore,
    SignSession,
};
