//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`transport`] — [`RecordingTransport`](transport::RecordingTransport), an
//!   in-memory [`MessageTransport`](crate::port::MessageTransport) with
//!   scriptable per-recipient failures.
//! - [`clock`] — [`FixedClock`](clock::FixedClock), a settable wall clock.
//! - [`config`] — Canonical ledger settings and TOML documents.
//! - [`ledger`] — [`TestLedger`](ledger::TestLedger), a fully wired service
//!   with handles on its transport and clock.

pub mod clock;
pub mod config;
pub mod ledger;
pub mod transport;
