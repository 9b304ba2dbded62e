//! Canonical test configurations.
//!
//! Single source of truth for ledger settings used across tests.

use rust_decimal_macros::dec;

use crate::application::{LedgerSettings, MessageFormat};
use crate::domain::ParticipantId;

/// Operator identity used by every canonical configuration.
pub const OPERATOR: ParticipantId = ParticipantId::new(1000);

/// Ledger settings with the default brand and currency and a 10,000 ceiling.
pub fn settings() -> LedgerSettings {
    LedgerSettings {
        operator: OPERATOR,
        monthly_limit: dec!(10000),
        format: MessageFormat::default(),
    }
}

/// Minimal valid TOML configuration for the given operator.
pub fn toml(operator_id: i64) -> String {
    format!(
        r#"
[logging]
level = "debug"
format = "pretty"

[ledger]
operator_id = {operator_id}
monthly_limit = "10000"
"#
    )
}
