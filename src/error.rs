use thiserror::Error;

use crate::domain::ParticipantId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A transport could not deliver a message to one participant.
///
/// Recovered locally by the broadcast dispatcher; never aborts a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery to {participant} failed: {reason}")]
pub struct DeliveryError {
    pub participant: ParticipantId,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(participant: ParticipantId, reason: impl Into<String>) -> Self {
        Self {
            participant,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("telegram error: {0}")]
    Telegram(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "telegram")]
impl From<teloxide::RequestError> for Error {
    fn from(err: teloxide::RequestError) -> Self {
        Error::Telegram(err.to_string())
    }
}
