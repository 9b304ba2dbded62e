//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Telegram front end driving [`LedgerControl`](crate::port::LedgerControl)
//! - [`outbound`] - [`MessageTransport`](crate::port::MessageTransport) implementations

pub mod inbound;
pub mod outbound;
