use anyhow::{Context, Result};
use async_nats::Client;
use async_trait::async_trait;
use tracing::{debug, info};

use super::messages::SignUpdateMessage;
use super::UpdateSink;

/// Publishes session updates to NATS.
///
/// One subject per session: `sign.update.session-{id}`. Anything
/// interested in a signer's text stream subscribes to that subject.
pub struct NatsNotifier {
    client: Client,
}

impl NatsNotifier {
    /// Connect to a NATS server.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    fn subject_for(session_id: &str) -> String {
        format!("sign.update.session-{}", session_id)
    }
}

#[async_trait]
impl UpdateSink for NatsNotifier {
    async fn publish(&self, message: &SignUpdateMessage) -> Result<()> {
        let subject = Self::subject_for(&message.session_id);
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish sign update")?;

        debug!("Published update to {}", subject);

        Ok(())
    }
}
