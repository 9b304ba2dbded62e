//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: message delivery
//! and the wall clock.

pub mod clock;
pub mod transport;
