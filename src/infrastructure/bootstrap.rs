//! Composition root for runtime wiring.

use std::sync::Arc;

use tracing::info;
#[cfg(not(feature = "telegram"))]
use tracing::warn;

use crate::application::LedgerService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{MessageTransport, SystemClock};

/// Build the ledger service from configuration and a transport.
#[must_use]
pub fn build_service(config: &Config, transport: Arc<dyn MessageTransport>) -> Arc<LedgerService> {
    Arc::new(LedgerService::new(
        config.ledger.settings(),
        transport,
        Arc::new(SystemClock),
    ))
}

/// Run the bot until shutdown.
///
/// Returns immediately when the Telegram adapter is disabled.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`](crate::error::ConfigError::MissingField)
/// when the bot token is not set.
#[cfg(feature = "telegram")]
pub async fn run(config: Config) -> Result<()> {
    use teloxide::Bot;

    use crate::adapter::inbound::telegram::bot::{run_bot, BotOptions};
    use crate::adapter::outbound::{LogTransport, TelegramTransport};
    use crate::error::ConfigError;
    use crate::infrastructure::config::settings::BOT_TOKEN_ENV;

    if !config.telegram.enabled {
        info!("Telegram adapter disabled; nothing to serve");
        return Ok(());
    }

    let token = config
        .telegram
        .bot_token
        .clone()
        .ok_or(ConfigError::MissingField {
            field: BOT_TOKEN_ENV,
        })?;
    let bot = Bot::new(token);

    let transport: Arc<dyn MessageTransport> = if config.dry_run {
        info!("Dry-run mode enabled; deliveries go to the log");
        Arc::new(LogTransport)
    } else {
        Arc::new(TelegramTransport::new(bot.clone()))
    };
    let service = build_service(&config, transport);

    info!(
        operator = config.ledger.operator_id,
        monthly_limit = %config.ledger.monthly_limit,
        dry_run = config.dry_run,
        "Ledger bot starting"
    );

    run_bot(
        bot,
        service,
        BotOptions {
            register_commands: config.telegram.register_commands,
        },
    )
    .await;
    Ok(())
}

/// Run the bot until shutdown (build without the `telegram` feature).
#[cfg(not(feature = "telegram"))]
pub async fn run(config: Config) -> Result<()> {
    if config.telegram.enabled {
        warn!("Telegram enabled in config but the `telegram` feature is not compiled in");
    }
    info!("No inbound adapter available; nothing to serve");
    Ok(())
}
