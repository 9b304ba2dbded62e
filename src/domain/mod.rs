//! Transport-agnostic domain types.

pub mod calendar;
pub mod id;
pub mod money;
pub mod participant;
pub mod quota;
pub mod status;

pub use calendar::{days_until_first_of_next_month, first_of_next_month, is_withdrawal_day};
pub use id::ParticipantId;
pub use money::{checked_sum, format_amount, Amount, AmountOverflow};
pub use participant::Participant;
pub use quota::MonthlyQuota;
pub use status::OrderStatus;
