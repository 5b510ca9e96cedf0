//! Outbound update stream
//!
//! The engine publishes incremental text updates (letters, completed
//! words, corrections) to per-session topics. Delivery is fire-and-forget:
//! the frame-processing path must succeed even when nobody is listening,
//! so publish failures are logged by the caller and never surfaced.

pub mod client;
pub mod messages;

use anyhow::Result;
use async_trait::async_trait;

pub use client::NatsNotifier;
pub use messages::{SignUpdate, SignUpdateMessage};

/// A pub/sub transport for session updates.
///
/// Implemented by `NatsNotifier` in production and by in-memory recorders
/// in tests. The core never depends on a specific transport's API shape.
#[async_trait]
pub trait UpdateSink: Send + Sync {
    async fn publish(&self, message: &SignUpdateMessage) -> Result<()>;
}
