//! Transport that writes deliveries to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ParticipantId;
use crate::error::DeliveryError;
use crate::port::MessageTransport;

/// Dry-run transport: every delivery succeeds and is logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MessageTransport for LogTransport {
    async fn deliver(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError> {
        info!(participant = %to, text, "Dry-run delivery");
        Ok(())
    }
}
