//! Ledgerbot - profit ledger, monthly quota and withdrawal desk for P2P
//! trading operators, driven through a Telegram bot.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Value types: participant ids, amounts, quota, calendar
//! - [`port`] - Command surface ([`port::LedgerControl`]) and outbound
//!   seams ([`port::MessageTransport`], [`port::Clock`])
//! - [`application`] - Ledger store, withdrawal book, access control,
//!   broadcast dispatcher and the [`application::LedgerService`]
//! - [`adapter`] - Telegram front end and message transports
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//! - [`cli`] - Command-line entry points
//!
//! # Features
//!
//! - `telegram` (default) - teloxide bot dispatcher and transport
//! - `testkit` - Test doubles for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ledgerbot::adapter::outbound::LogTransport;
//! use ledgerbot::infrastructure::bootstrap::build_service;
//! use ledgerbot::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     let _service = build_service(&config, Arc::new(LogTransport));
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
