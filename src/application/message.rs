//! Participant- and operator-facing message texts.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::domain::{format_amount, Amount, MonthlyQuota, OrderStatus, Participant, ParticipantId};

/// Timestamp layout used in status broadcasts, e.g. `05-Jun-2024, 09:30 PM`.
pub const TIMESTAMP_FORMAT: &str = "%d-%b-%Y, %I:%M %p";

pub const WELCOME: &str = "Welcome! Choose an option from the menu:";
pub const NOT_REGISTERED: &str = "You are not registered yet. Send /start first.";
pub const WITHDRAWAL_ALREADY_PENDING: &str =
    "Your withdrawal request is already in process. Please wait.";
pub const WITHDRAWAL_SUBMITTED: &str =
    "Withdrawal request submitted. Please wait for admin confirmation.";
pub const WITHDRAWAL_COMPLETED: &str = "Withdrawal completed successfully. Thank you!";
pub const BLOCKED_NOTICE: &str =
    "You have been blocked by the admin. You will no longer receive updates.";
pub const SEND_FAILED: &str = "Failed to send message.";
pub const AMOUNT_OUT_OF_RANGE: &str = "Amount too large. Nothing was recorded or sent.";

const PARTICIPANT_HELP: &str = "📋 Commands\n\n\
    /start - Register and show the menu\n\
    /daily - Your daily profit\n\
    /monthly - Your monthly profit\n\
    /withdraw - Request a withdrawal (opens on the 1st)\n\
    /help - Show this help";

const OPERATOR_HELP: &str = "📋 Operator commands\n\n\
    /broadcast_all <profit> <limit_used> [other_limit]\n\
    /broadcast_user <user_id> <profit> <limit_used> [other_limit]\n\
    /withdraw_done <user_id>\n\
    /users\n\
    /block <user_id>\n\
    /status_fail\n\
    /send_message <user_id> <your message>\n\
    /send_all_message <your message>";

/// Renders message texts with the configured brand and currency.
#[derive(Debug, Clone)]
pub struct MessageFormat {
    brand: String,
    currency: String,
}

impl MessageFormat {
    pub fn new(brand: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            currency: currency.into(),
        }
    }

    #[must_use]
    pub fn amount(&self, amount: Amount) -> String {
        format_amount(&self.currency, amount)
    }

    /// Status broadcast body for one target.
    #[must_use]
    pub fn status(
        &self,
        status: OrderStatus,
        at: NaiveDateTime,
        profit: Amount,
        quota: MonthlyQuota,
        note: Option<&str>,
        lifetime: Amount,
    ) -> String {
        format!(
            "{}\n\n\
            Order Status: {}\n\
            Date & Time: {}\n\
            Daily Profit: {}\n\
            LIMIT REMAINING: {} / {}\n\
            Other Limit: {}\n\
            Lifetime Profit: {}",
            self.brand,
            status,
            at.format(TIMESTAMP_FORMAT),
            self.amount(profit),
            self.amount(quota.remaining()),
            self.amount(quota.ceiling()),
            note.filter(|n| !n.is_empty()).unwrap_or("Nil"),
            self.amount(lifetime),
        )
    }

    #[must_use]
    pub fn daily_profit(&self, amount: Amount) -> String {
        format!("Your Daily Profit: {}", self.amount(amount))
    }

    #[must_use]
    pub fn monthly_profit(&self, amount: Amount) -> String {
        format!("Your Monthly Profit: {}", self.amount(amount))
    }

    #[must_use]
    pub fn withdrawal_submitted_with_countdown(days: i64) -> String {
        format!(
            "{WITHDRAWAL_SUBMITTED}\n{days} day(s) remaining until the 1st of next month."
        )
    }

    #[must_use]
    pub fn withdrawal_not_open(days: i64) -> String {
        format!("Withdrawals available on the 1st. Please wait {days} day(s).")
    }

    #[must_use]
    pub fn participant_list<'a>(participants: impl Iterator<Item = &'a Participant>) -> String {
        let mut out = String::from("Registered users:");
        let mut any = false;
        for participant in participants {
            any = true;
            let _ = write!(out, "\n{}: {}", participant.id(), participant.display_name());
        }
        if !any {
            out.push_str("\n(none)");
        }
        out
    }

    #[must_use]
    pub fn help(operator: bool) -> String {
        if operator {
            format!("{PARTICIPANT_HELP}\n\n{OPERATOR_HELP}")
        } else {
            PARTICIPANT_HELP.to_string()
        }
    }

    #[must_use]
    pub fn broadcast_confirmation(delivered: usize, failed: usize) -> String {
        format!("Broadcast sent to all users.\nDelivered: {delivered}, failed: {failed}")
    }

    #[must_use]
    pub fn direct_confirmation(target: ParticipantId) -> String {
        format!("Message sent to user {target}.")
    }

    #[must_use]
    pub fn blocked_confirmation(target: ParticipantId) -> String {
        format!("User {target} has been blocked.")
    }

    #[must_use]
    pub fn not_registered(target: ParticipantId) -> String {
        format!("User {target} is not registered.")
    }

    #[must_use]
    pub fn target_blocked(target: ParticipantId) -> String {
        format!("User {target} is blocked.")
    }

    #[must_use]
    pub fn custom_confirmation(delivered: usize) -> String {
        format!("Custom message sent to {delivered} users.")
    }
}

impl Default for MessageFormat {
    fn default() -> Self {
        Self::new("BINANCE P2P", "₹")
    }
}
