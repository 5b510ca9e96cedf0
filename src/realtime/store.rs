use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::session::SignSession;
use crate::config::RealtimeConfig;

/// A session behind its own lock.
///
/// The lock is held for the whole of one frame/sequence/correction
/// operation, including the await on the classifier, so frames of the
/// same session never interleave.
pub type SharedSession = Arc<Mutex<SignSession>>;

/// Owns the session-id → session mapping.
///
/// Injectable (no global state): the engine holds one instance, tests
/// build their own. The map lock is only ever taken before a session
/// lock, never after.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
    config: RealtimeConfig,
}

impl SessionStore {
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Insert a fresh session, resetting any existing one with this id.
    pub async fn create(&self, id: &str) -> SharedSession {
        let session = Arc::new(Mutex::new(SignSession::new(id, &self.config)));

        let mut sessions = self.sessions.write().await;
        if sessions.insert(id.to_string(), Arc::clone(&session)).is_some() {
            debug!("Existing session reset: {}", id);
        } else {
            info!("New session created: {}", id);
        }

        session
    }

    /// Resolve a session, creating it on first reference. Refreshes the
    /// inactivity timer either way.
    pub async fn get_or_create(&self, id: &str) -> SharedSession {
        let existing = {
            let sessions = self.sessions.read().await;
            sessions.get(id).map(Arc::clone)
        };

        let session = match existing {
            Some(session) => session,
            None => {
                let mut sessions = self.sessions.write().await;
                sessions
                    .entry(id.to_string())
                    .or_insert_with(|| {
                        info!("New session created: {}", id);
                        Arc::new(Mutex::new(SignSession::new(id, &self.config)))
                    })
                    .clone()
            }
        };

        session.lock().await.touch();
        session
    }

    /// Look up a session without refreshing its inactivity timer.
    pub async fn get(&self, id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(Arc::clone)
    }

    /// Take a session out of the map.
    pub async fn remove(&self, id: &str) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Remove every session idle for longer than `timeout`.
    ///
    /// Runs in two phases so the map's write lock is never held while
    /// waiting on a busy session: candidates are collected under a read
    /// lock, then removed under the write lock with the idle check
    /// repeated. A session whose lock is held is in active use and is
    /// skipped outright. Removals are silent apart from the log line.
    pub async fn sweep(&self, now: DateTime<Utc>, timeout: Duration) -> usize {
        let candidates: Vec<(String, SharedSession)> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .map(|(id, session)| (id.clone(), Arc::clone(session)))
                .collect()
        };

        let mut expired = Vec::new();
        for (id, session) in candidates {
            if let Ok(guard) = session.try_lock() {
                if now - guard.last_activity > timeout {
                    expired.push(id);
                }
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        for id in expired {
            let still_expired = sessions
                .get(&id)
                .and_then(|session| session.try_lock().ok())
                .map(|guard| now - guard.last_activity > timeout)
                .unwrap_or(false);

            if still_expired {
                sessions.remove(&id);
                removed += 1;
                info!("Cleaned up inactive session: {}", id);
            }
        }

        removed
    }
}
