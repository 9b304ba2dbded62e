//! Outbound adapters (driven side): message transports.

pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogTransport;

#[cfg(feature = "telegram")]
pub use telegram::TelegramTransport;
