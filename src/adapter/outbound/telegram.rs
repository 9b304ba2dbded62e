//! Telegram delivery via the Bot API.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::debug;

use crate::domain::ParticipantId;
use crate::error::DeliveryError;
use crate::port::MessageTransport;

/// Sends plain-text messages to private chats.
///
/// A participant's chat id equals its user id, so no lookup is needed.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn deliver(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(ChatId(to.value()), text)
            .await
            .map(|sent| debug!(participant = %to, message_id = sent.id.0, "Delivered"))
            .map_err(|e| DeliveryError::new(to, e.to_string()))
    }
}
