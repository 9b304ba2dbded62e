//! Ledger configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::{LedgerSettings, MessageFormat};
use crate::domain::ParticipantId;
use crate::error::ConfigError;

fn default_monthly_limit() -> Decimal {
    dec!(200000)
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_brand() -> String {
    "BINANCE P2P".to_string()
}

/// Operator identity, quota ceiling and message branding.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Telegram user id of the operator. Required.
    #[serde(default)]
    pub operator_id: i64,
    /// Shared monthly quota ceiling.
    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: Decimal,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Header line of status broadcasts.
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            operator_id: 0,
            monthly_limit: default_monthly_limit(),
            currency_symbol: default_currency_symbol(),
            brand: default_brand(),
        }
    }
}

impl LedgerConfig {
    #[must_use]
    pub fn operator(&self) -> ParticipantId {
        ParticipantId::new(self.operator_id)
    }

    /// Settings for constructing the ledger service.
    #[must_use]
    pub fn settings(&self) -> LedgerSettings {
        LedgerSettings {
            operator: self.operator(),
            monthly_limit: self.monthly_limit,
            format: MessageFormat::new(self.brand.clone(), self.currency_symbol.clone()),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.operator_id == 0 {
            return Err(ConfigError::MissingField {
                field: "ledger.operator_id",
            });
        }
        if self.monthly_limit <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "ledger.monthly_limit",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ledger.currency_symbol",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
