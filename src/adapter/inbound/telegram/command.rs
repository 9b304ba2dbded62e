//! Telegram command parsing.

use std::str::FromStr;

use crate::domain::{Amount, ParticipantId};
use crate::port::{Command, CommandKind, Rejected, StatusReport, WithdrawalEntry};

/// Callback data carried by the main-menu buttons.
pub const CALLBACK_DAILY: &str = "check_daily_profit";
pub const CALLBACK_MONTHLY: &str = "check_monthly_profit";
pub const CALLBACK_WITHDRAW: &str = "withdraw";

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    Invalid(Rejected),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::Invalid(rejected) => write!(f, "{}", rejected.reason),
        }
    }
}

impl std::error::Error for CommandParseError {}

fn invalid(kind: CommandKind, reason: impl Into<String>) -> CommandParseError {
    CommandParseError::Invalid(Rejected {
        kind,
        reason: reason.into(),
    })
}

/// Positional argument reader bound to one command.
struct Args<'a> {
    kind: CommandKind,
    parts: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
}

impl<'a> Args<'a> {
    fn required(&mut self, name: &'static str) -> Result<&'a str, CommandParseError> {
        self.parts
            .next()
            .ok_or_else(|| invalid(self.kind, format!("missing argument `{name}`")))
    }

    /// A non-negative decimal amount.
    fn amount(&mut self, name: &'static str) -> Result<Amount, CommandParseError> {
        let raw = self.required(name)?;
        match Amount::from_str(raw) {
            Ok(amount) if amount >= Amount::ZERO => Ok(amount),
            _ => Err(invalid(self.kind, format!("invalid amount `{raw}`"))),
        }
    }

    fn participant(&mut self) -> Result<ParticipantId, CommandParseError> {
        let raw = self.required("user_id")?;
        raw.parse()
            .map_err(|_| invalid(self.kind, format!("invalid user id `{raw}`")))
    }

    /// Remaining words joined by single spaces, or `None` when there are none.
    fn rest(&mut self) -> Option<String> {
        let words: Vec<&str> = self.parts.by_ref().collect();
        (!words.is_empty()).then(|| words.join(" "))
    }

    fn text(&mut self) -> Result<String, CommandParseError> {
        self.rest()
            .ok_or_else(|| invalid(self.kind, "missing argument `message`"))
    }

    fn finish(&mut self) -> Result<(), CommandParseError> {
        match self.parts.peek() {
            Some(extra) => Err(invalid(self.kind, format!("unexpected argument `{extra}`"))),
            None => Ok(()),
        }
    }

    fn status_report(&mut self) -> Result<StatusReport, CommandParseError> {
        let profit = self.amount("profit")?;
        let quota_used = self.amount("limit_used")?;
        let note = self.rest();
        Ok(StatusReport {
            profit,
            quota_used,
            note,
        })
    }
}

/// Parse a Telegram message into a ledger command.
pub fn parse_command(text: &str) -> Result<Command, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    let kind = match command {
        "/start" => CommandKind::Register,
        "/help" => CommandKind::Help,
        "/daily" => CommandKind::DailyProfit,
        "/monthly" => CommandKind::MonthlyProfit,
        "/withdraw" => CommandKind::WithdrawGated,
        "/broadcast_all" => CommandKind::BroadcastAll,
        "/broadcast_user" => CommandKind::BroadcastOne,
        "/withdraw_done" => CommandKind::WithdrawDone,
        "/users" => CommandKind::ListParticipants,
        "/block" => CommandKind::Block,
        "/status_fail" => CommandKind::StatusFail,
        "/send_message" => CommandKind::SendDirect,
        "/send_all_message" => CommandKind::SendAll,
        other => return Err(CommandParseError::UnknownCommand(other.to_string())),
    };

    let mut args = Args {
        kind,
        parts: parts.peekable(),
    };

    let command = match kind {
        CommandKind::Register => Command::Register,
        CommandKind::Help => Command::Help,
        CommandKind::DailyProfit => Command::QueryDailyProfit,
        CommandKind::MonthlyProfit => Command::QueryMonthlyProfit,
        CommandKind::WithdrawGated | CommandKind::WithdrawInteractive => {
            Command::RequestWithdrawal(WithdrawalEntry::Gated)
        }
        CommandKind::BroadcastAll => Command::BroadcastAll(args.status_report()?),
        CommandKind::BroadcastOne => {
            let target = args.participant()?;
            let report = args.status_report()?;
            Command::BroadcastOne { target, report }
        }
        CommandKind::WithdrawDone => {
            let target = args.participant()?;
            args.finish()?;
            Command::MarkWithdrawalDone { target }
        }
        CommandKind::ListParticipants => Command::ListParticipants,
        CommandKind::Block => {
            let target = args.participant()?;
            args.finish()?;
            Command::BlockParticipant { target }
        }
        CommandKind::StatusFail => Command::BroadcastFailureStatus,
        CommandKind::SendDirect => {
            let target = args.participant()?;
            let text = args.text()?;
            Command::SendDirect { target, text }
        }
        CommandKind::SendAll => Command::SendBroadcastText { text: args.text()? },
    };
    Ok(command)
}

/// Parse inline-keyboard callback data. Unknown data yields `None`.
#[must_use]
pub fn parse_callback(data: &str) -> Option<Command> {
    match data {
        CALLBACK_DAILY => Some(Command::QueryDailyProfit),
        CALLBACK_MONTHLY => Some(Command::QueryMonthlyProfit),
        CALLBACK_WITHDRAW => Some(Command::RequestWithdrawal(WithdrawalEntry::Interactive)),
        _ => None,
    }
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Register and show the menu"),
        ("daily", "Your daily profit"),
        ("monthly", "Your monthly profit"),
        ("withdraw", "Request a withdrawal"),
        ("help", "Show all commands"),
    ]
}
