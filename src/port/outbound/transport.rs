//! Message transport port.
//!
//! The ledger only ever needs one outbound capability: deliver a text to a
//! participant. Delivery is fire-and-forget from the caller's point of view
//! but returns a result so batches can report what reached whom.

use async_trait::async_trait;

use crate::domain::ParticipantId;
use crate::error::DeliveryError;

/// Trait for outbound message delivery.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - A failure for one participant must not affect later calls
/// - No retry or timeout semantics are expected from implementations
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Deliver `text` to `to`.
    async fn deliver(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError>;
}
