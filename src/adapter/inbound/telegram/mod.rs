//! Telegram bot front end.
//!
//! Parses slash commands and menu callbacks into ledger commands. The
//! teloxide dispatcher in [`bot`] requires the `telegram` feature.

pub mod command;
pub mod handler;

#[cfg(feature = "telegram")]
pub mod bot;
