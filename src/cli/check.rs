//! Configuration validation command.

use std::path::Path;

use crate::infrastructure::config::settings::{Config, BOT_TOKEN_ENV};

/// Validate configuration file without starting the bot.
///
/// Returns `false` when the file is missing or invalid.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> bool {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());
    println!();

    if !path.exists() {
        eprintln!("Error: Configuration file not found: {}", path.display());
        return false;
    }

    match Config::load(path) {
        Ok(config) => {
            let settings = config.ledger.settings();
            println!("✓ Configuration file is valid");
            println!();
            println!("Summary:");
            println!("  Operator: {}", settings.operator);
            println!(
                "  Monthly limit: {}",
                settings.format.amount(settings.monthly_limit)
            );
            println!("  Brand: {}", config.ledger.brand);
            println!("  Dry-run: {}", config.dry_run);
            println!();

            if !config.telegram.enabled {
                println!("- Telegram disabled");
            } else if config.telegram.bot_token.is_some() {
                println!("✓ Telegram enabled (token from {BOT_TOKEN_ENV})");
            } else {
                println!("⚠ Telegram enabled but {BOT_TOKEN_ENV} is not set");
            }
            true
        }
        Err(e) => {
            eprintln!("✗ Configuration invalid: {e}");
            false
        }
    }
}
