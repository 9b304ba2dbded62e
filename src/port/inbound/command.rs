//! Command surface exposed to transports.
//!
//! Transports translate whatever their users type or click into a
//! [`Command`] and hand it to a [`LedgerControl`] together with the
//! [`Principal`] who issued it. Replies come back as plain text plus an
//! optional menu hint; how those are rendered is the transport's business.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Amount, ParticipantId};

/// Who issued a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable numeric identity.
    pub id: ParticipantId,
    /// Name shown in participant listings.
    pub display_name: String,
}

impl Principal {
    pub fn new(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Access classification of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The single configured operator identity.
    Operator,
    /// A regular, non-blocked participant.
    Participant,
    /// Excluded from all processing.
    Blocked,
}

/// How a non-operator is turned away from an operator-only command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No reply at all.
    Silent,
    /// Reply with the command's usage line.
    Usage,
}

/// Which entry point a withdrawal request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalEntry {
    /// Menu button: opens a request on any day.
    Interactive,
    /// Text command: opens a request only on the 1st of the month.
    Gated,
}

/// Figures carried by a profit/quota status broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    /// Profit credited to every target.
    pub profit: Amount,
    /// Quota usage charged once per broadcast.
    pub quota_used: Amount,
    /// Free-form "other limit" note.
    pub note: Option<String>,
}

/// Logical commands understood by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Register,
    Help,
    QueryDailyProfit,
    QueryMonthlyProfit,
    RequestWithdrawal(WithdrawalEntry),
    BroadcastAll(StatusReport),
    BroadcastOne {
        target: ParticipantId,
        report: StatusReport,
    },
    MarkWithdrawalDone {
        target: ParticipantId,
    },
    ListParticipants,
    BlockParticipant {
        target: ParticipantId,
    },
    BroadcastFailureStatus,
    SendDirect {
        target: ParticipantId,
        text: String,
    },
    SendBroadcastText {
        text: String,
    },
}

impl Command {
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Register => CommandKind::Register,
            Self::Help => CommandKind::Help,
            Self::QueryDailyProfit => CommandKind::DailyProfit,
            Self::QueryMonthlyProfit => CommandKind::MonthlyProfit,
            Self::RequestWithdrawal(WithdrawalEntry::Interactive) => {
                CommandKind::WithdrawInteractive
            }
            Self::RequestWithdrawal(WithdrawalEntry::Gated) => CommandKind::WithdrawGated,
            Self::BroadcastAll(_) => CommandKind::BroadcastAll,
            Self::BroadcastOne { .. } => CommandKind::BroadcastOne,
            Self::MarkWithdrawalDone { .. } => CommandKind::WithdrawDone,
            Self::ListParticipants => CommandKind::ListParticipants,
            Self::BlockParticipant { .. } => CommandKind::Block,
            Self::BroadcastFailureStatus => CommandKind::StatusFail,
            Self::SendDirect { .. } => CommandKind::SendDirect,
            Self::SendBroadcastText { .. } => CommandKind::SendAll,
        }
    }
}

/// Argument-free tag for a [`Command`], used for authorization and usage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Register,
    Help,
    DailyProfit,
    MonthlyProfit,
    WithdrawInteractive,
    WithdrawGated,
    BroadcastAll,
    BroadcastOne,
    WithdrawDone,
    ListParticipants,
    Block,
    StatusFail,
    SendDirect,
    SendAll,
}

impl CommandKind {
    /// Whether only the operator may run this command.
    #[must_use]
    pub const fn operator_only(self) -> bool {
        matches!(
            self,
            Self::BroadcastAll
                | Self::BroadcastOne
                | Self::WithdrawDone
                | Self::ListParticipants
                | Self::Block
                | Self::StatusFail
                | Self::SendDirect
                | Self::SendAll
        )
    }

    /// Reply policy when a non-operator invokes an operator-only command.
    #[must_use]
    pub const fn denial(self) -> Denial {
        match self {
            Self::BroadcastOne | Self::SendDirect | Self::SendAll => Denial::Usage,
            _ => Denial::Silent,
        }
    }

    /// One-line usage text.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Register => "Usage: /start",
            Self::Help => "Usage: /help",
            Self::DailyProfit => "Usage: /daily",
            Self::MonthlyProfit => "Usage: /monthly",
            Self::WithdrawInteractive | Self::WithdrawGated => "Usage: /withdraw",
            Self::BroadcastAll => "Usage: /broadcast_all <profit> <limit_used> [other_limit]",
            Self::BroadcastOne => {
                "Usage: /broadcast_user <user_id> <profit> <limit_used> [other_limit]"
            }
            Self::WithdrawDone => "Usage: /withdraw_done <user_id>",
            Self::ListParticipants => "Usage: /users",
            Self::Block => "Usage: /block <user_id>",
            Self::StatusFail => "Usage: /status_fail",
            Self::SendDirect => "Usage: /send_message <user_id> <your message>",
            Self::SendAll => "Usage: /send_all_message <your message>",
        }
    }

    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Help => "help",
            Self::DailyProfit => "daily_profit",
            Self::MonthlyProfit => "monthly_profit",
            Self::WithdrawInteractive => "withdraw_interactive",
            Self::WithdrawGated => "withdraw_gated",
            Self::BroadcastAll => "broadcast_all",
            Self::BroadcastOne => "broadcast_one",
            Self::WithdrawDone => "withdraw_done",
            Self::ListParticipants => "list_participants",
            Self::Block => "block",
            Self::StatusFail => "status_fail",
            Self::SendDirect => "send_direct",
            Self::SendAll => "send_all",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A button on the participant main menu: (label, command token).
pub type MenuButton = (&'static str, &'static str);

/// Main menu offered after registration.
pub const MAIN_MENU: [MenuButton; 3] = [
    ("Check Daily Profit", "check_daily_profit"),
    ("Check Monthly Profit", "check_monthly_profit"),
    ("Withdraw", "withdraw"),
];

/// Text reply to the issuing principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Attach [`MAIN_MENU`] to the reply.
    pub with_menu: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_menu: false,
        }
    }

    pub fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            with_menu: true,
        }
    }
}

/// A command that could not be built from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Command the input was aimed at.
    pub kind: CommandKind,
    /// What was wrong with the arguments.
    pub reason: String,
}

/// Application entry point for transports.
#[async_trait]
pub trait LedgerControl: Send + Sync {
    /// Classify a principal.
    fn role_of(&self, principal: ParticipantId) -> Role;

    /// Execute a command. `None` means stay silent.
    async fn execute(&self, principal: &Principal, command: Command) -> Option<Reply>;

    /// Respond to input whose arguments failed validation. `None` means stay silent.
    fn reject(&self, principal: &Principal, rejected: &Rejected) -> Option<Reply>;
}
