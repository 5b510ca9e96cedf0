use crate::classifier::SignClassifier;
use crate::realtime::RealtimeEngine;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Realtime engine owning the session store
    pub engine: Arc<RealtimeEngine>,

    /// Classifier port, also exposed through the stateless predict routes
    pub classifier: Arc<dyn SignClassifier>,
}

impl AppState {
    pub fn new(engine: Arc<RealtimeEngine>, classifier: Arc<dyn SignClassifier>) -> Self {
        Self { engine, classifier }
    }
}
