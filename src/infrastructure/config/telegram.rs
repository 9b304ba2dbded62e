//! Telegram bot configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Start the Telegram listener on `run`.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Publish the "/" command menu on startup.
    #[serde(default = "default_true")]
    pub register_commands: bool,
    /// Loaded from `TELEGRAM_BOT_TOKEN`, never from the file.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            register_commands: default_true(),
            bot_token: None,
        }
    }
}
