//! Inbound (driving) ports consumed by inbound adapters.
//!
//! Inbound ports expose application capabilities to external drivers such as
//! the Telegram bot and the command-line interface.
//!
//! # Modules
//!
//! - [`command`]: Command surface, principals, roles and replies

pub mod command;
