//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! Inbound ports are what transports drive; outbound ports are what the
//! application drives.
//!
//! ```text
//!   ┌───────────┐      ┌─────────────────────┐      ┌───────────┐
//!   │ Telegram  │ ───▶ │  LedgerControl      │ ───▶ │ Message   │
//!   │  Adapter  │      │  (LedgerService)    │      │ Transport │
//!   └───────────┘      └─────────────────────┘      └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`LedgerControl`] - Command execution for transports
//! - [`MessageTransport`] - Outbound delivery to a participant
//! - [`Clock`] - Current local time

pub mod inbound;
pub mod outbound;

pub use inbound::command::{
    Command, CommandKind, Denial, LedgerControl, MenuButton, Principal, Rejected, Reply, Role,
    StatusReport, WithdrawalEntry, MAIN_MENU,
};
pub use outbound::clock::{Clock, SystemClock};
pub use outbound::transport::MessageTransport;
