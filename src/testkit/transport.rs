//! In-memory message transport.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ParticipantId;
use crate::error::DeliveryError;
use crate::port::MessageTransport;

/// Records every delivery attempt; recipients in the failing set are refused.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ParticipantId, String)>>,
    failing: Mutex<HashSet<ParticipantId>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that refuses delivery to every id in `ids`.
    pub fn failing_for(ids: impl IntoIterator<Item = ParticipantId>) -> Self {
        let transport = Self::default();
        transport.failing.lock().extend(ids);
        transport
    }

    pub fn fail(&self, id: ParticipantId) {
        self.failing.lock().insert(id);
    }

    pub fn recover(&self, id: ParticipantId) {
        self.failing.lock().remove(&id);
    }

    /// Successful deliveries in the order they landed.
    pub fn sent(&self) -> Vec<(ParticipantId, String)> {
        self.sent.lock().clone()
    }

    pub fn messages_to(&self, id: ParticipantId) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Distinct recipients, sorted.
    pub fn recipients(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<_> = self.sent.lock().iter().map(|(to, _)| *to).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn deliver(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError> {
        if self.failing.lock().contains(&to) {
            return Err(DeliveryError::new(to, "chat not found"));
        }
        self.sent.lock().push((to, text.to_string()));
        Ok(())
    }
}
