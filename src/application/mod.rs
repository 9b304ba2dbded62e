//! Application services (use cases).
//!
//! These services hold the ledger state and coordinate the outbound
//! transport to implement the bot's commands.

pub mod access;
pub mod broadcast;
pub mod ledger;
pub mod message;
pub mod service;
pub mod state;
pub mod withdrawal;

pub use access::{Access, AccessControl, DenialReason};
pub use broadcast::{BroadcastDispatcher, DeliveryReport, Outgoing, StatusRefusal, Targets};
pub use ledger::{LedgerStore, Registration};
pub use message::MessageFormat;
pub use service::{LedgerService, LedgerSettings};
pub use state::{Books, LedgerState};
pub use withdrawal::{Completion, WithdrawalBook, WithdrawalOutcome};
