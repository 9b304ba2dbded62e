//! Ledger service: the single state-owning component behind every command.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{Amount, Participant, ParticipantId};
use crate::port::{
    Clock, Command, Denial, LedgerControl, MessageTransport, Principal, Rejected, Reply, Role,
    StatusReport, WithdrawalEntry,
};

use super::access::{Access, DenialReason};
use super::broadcast::{BroadcastDispatcher, DeliveryReport, StatusRefusal, Targets};
use super::ledger::Registration;
use super::message::{self, MessageFormat};
use super::state::LedgerState;
use super::withdrawal::WithdrawalOutcome;

/// Construction parameters for [`LedgerService`].
#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub operator: ParticipantId,
    pub monthly_limit: Amount,
    pub format: MessageFormat,
}

/// Executes commands against the shared ledger state.
///
/// Constructed once at startup and shared behind an `Arc`. All mutation is
/// routed through [`LedgerState`]; deliveries happen after the lock is
/// released.
pub struct LedgerService {
    state: Arc<LedgerState>,
    dispatcher: BroadcastDispatcher,
    clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(
        settings: LedgerSettings,
        transport: Arc<dyn MessageTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(LedgerState::new(settings.operator, settings.monthly_limit)),
            dispatcher: BroadcastDispatcher::new(transport, settings.format),
            clock,
        }
    }

    /// Shared state, for inspection.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    fn format(&self) -> &MessageFormat {
        self.dispatcher.format()
    }

    fn register(&self, principal: &Principal) -> Reply {
        let registration = self.state.with(|books| {
            books
                .ledger
                .register_or_refresh(principal.id, principal.display_name.clone())
        });
        match registration {
            Registration::New => {
                info!(participant = %principal.id, name = %principal.display_name, "Participant registered");
            }
            Registration::Refreshed => {
                debug!(participant = %principal.id, "Participant refreshed");
            }
        }
        Reply::with_menu(message::WELCOME)
    }

    fn query(
        &self,
        principal: &Principal,
        pick: fn(&Participant) -> Amount,
        render: fn(&MessageFormat, Amount) -> String,
    ) -> Reply {
        let figure = self
            .state
            .with(|books| books.ledger.participant(principal.id).map(pick));
        match figure {
            Some(amount) => Reply::text(render(self.format(), amount)),
            None => Reply::text(message::NOT_REGISTERED),
        }
    }

    fn request_withdrawal(&self, principal: &Principal, entry: WithdrawalEntry) -> Reply {
        let today = self.clock.today();
        let outcome = self
            .state
            .with(|books| books.withdrawals.request(principal.id, today, entry));

        match outcome {
            WithdrawalOutcome::AlreadyPending => {
                debug!(participant = %principal.id, "Withdrawal already pending");
                Reply::text(message::WITHDRAWAL_ALREADY_PENDING)
            }
            WithdrawalOutcome::Submitted { days_remaining } => {
                info!(participant = %principal.id, ?entry, "Withdrawal requested");
                match entry {
                    WithdrawalEntry::Interactive => Reply::text(
                        MessageFormat::withdrawal_submitted_with_countdown(days_remaining),
                    ),
                    WithdrawalEntry::Gated => Reply::text(message::WITHDRAWAL_SUBMITTED),
                }
            }
            WithdrawalOutcome::NotYetOpen { days_remaining } => {
                Reply::text(MessageFormat::withdrawal_not_open(days_remaining))
            }
        }
    }

    async fn broadcast_all(&self, report: &StatusReport) -> Reply {
        let delivery = match self
            .dispatcher
            .broadcast_status(&self.state, Targets::All, report, self.clock.now())
            .await
        {
            Ok(delivery) => delivery,
            Err(refusal) => return Self::refused(refusal, report),
        };
        info!(
            profit = %report.profit,
            quota_used = %report.quota_used,
            delivered = delivery.delivered_count(),
            "Status broadcast to all participants"
        );
        Reply::text(MessageFormat::broadcast_confirmation(
            delivery.delivered_count(),
            delivery.failed_count(),
        ))
    }

    async fn broadcast_one(&self, target: ParticipantId, report: &StatusReport) -> Reply {
        if self.state.access().is_operator(target) {
            return Reply::text("Cannot send message to admin.");
        }

        let delivery = match self
            .dispatcher
            .broadcast_status(&self.state, Targets::One(target), report, self.clock.now())
            .await
        {
            Ok(delivery) => delivery,
            Err(refusal) => return Self::refused(refusal, report),
        };
        info!(
            participant = %target,
            profit = %report.profit,
            quota_used = %report.quota_used,
            delivered = delivery.reached(target),
            "Status broadcast to participant"
        );
        if delivery.reached(target) {
            Reply::text(MessageFormat::direct_confirmation(target))
        } else {
            Reply::text(message::SEND_FAILED)
        }
    }

    fn refused(refusal: StatusRefusal, report: &StatusReport) -> Reply {
        match refusal {
            StatusRefusal::Blocked(target) => {
                debug!(participant = %target, "Status broadcast to blocked participant refused");
                Reply::text(MessageFormat::target_blocked(target))
            }
            StatusRefusal::Overflow => {
                warn!(
                    profit = %report.profit,
                    quota_used = %report.quota_used,
                    "Status broadcast refused: amount out of range"
                );
                Reply::text(message::AMOUNT_OUT_OF_RANGE)
            }
        }
    }

    async fn mark_withdrawal_done(&self, target: ParticipantId) -> Reply {
        let (registered, blocked, completion) = self.state.with(|books| {
            (
                books.ledger.is_registered(target),
                books.ledger.is_blocked(target),
                books.mark_done(target),
            )
        });
        info!(
            participant = %target,
            cleared = completion.cleared,
            quota_reset = completion.quota_reset,
            "Withdrawal marked done"
        );

        if !registered {
            return Reply::text(MessageFormat::not_registered(target));
        }
        if blocked {
            debug!(participant = %target, "Skipping completion notice for blocked participant");
        } else {
            // Notification failure is logged by the dispatcher; the request is
            // closed either way.
            let _ = self
                .dispatcher
                .send(target, message::WITHDRAWAL_COMPLETED)
                .await;
        }
        Reply::text("Withdrawal marked as done.")
    }

    fn list_participants(&self) -> Reply {
        let listing = self
            .state
            .with(|books| MessageFormat::participant_list(books.ledger.participants()));
        Reply::text(listing)
    }

    async fn block(&self, target: ParticipantId) -> Reply {
        if self.state.access().is_operator(target) {
            return Reply::text("Cannot block the operator.");
        }
        let newly = self.state.with(|books| books.ledger.block(target));
        info!(participant = %target, newly, "Participant blocked");

        let _ = self.dispatcher.send(target, message::BLOCKED_NOTICE).await;
        Reply::text(MessageFormat::blocked_confirmation(target))
    }

    async fn broadcast_failure(&self) -> Reply {
        let delivery = self
            .dispatcher
            .broadcast_failure(&self.state, self.clock.now())
            .await;
        info!(delivered = delivery.delivered_count(), "Failure status broadcast");
        Reply::text("Fail status sent to all users.")
    }

    async fn send_direct(&self, target: ParticipantId, text: &str) -> Reply {
        if self.state.with(|books| books.ledger.is_blocked(target)) {
            return Reply::text(MessageFormat::target_blocked(target));
        }
        match self.dispatcher.send(target, text).await {
            Ok(()) => Reply::text("Message sent successfully."),
            Err(_) => Reply::text(message::SEND_FAILED),
        }
    }

    async fn send_broadcast_text(&self, text: &str) -> Reply {
        let delivery: DeliveryReport = self.dispatcher.broadcast_text(&self.state, text).await;
        Reply::text(MessageFormat::custom_confirmation(delivery.delivered_count()))
    }
}

#[async_trait]
impl LedgerControl for LedgerService {
    fn role_of(&self, principal: ParticipantId) -> Role {
        self.state.role_of(principal)
    }

    async fn execute(&self, principal: &Principal, command: Command) -> Option<Reply> {
        let kind = command.kind();
        let role = match self.state.authorize(principal.id, kind) {
            Access::Admitted(role) => role,
            Access::Denied(DenialReason::Blocked | DenialReason::NotOperator(Denial::Silent)) => {
                return None;
            }
            Access::Denied(DenialReason::NotOperator(Denial::Usage)) => {
                return Some(Reply::text(kind.usage()));
            }
        };
        debug!(participant = %principal.id, command = %kind, "Executing command");

        let reply = match command {
            Command::Register => self.register(principal),
            Command::Help => Reply::text(MessageFormat::help(role == Role::Operator)),
            Command::QueryDailyProfit => {
                self.query(principal, Participant::daily_profit, MessageFormat::daily_profit)
            }
            Command::QueryMonthlyProfit => {
                self.query(principal, Participant::monthly_profit, MessageFormat::monthly_profit)
            }
            Command::RequestWithdrawal(entry) => self.request_withdrawal(principal, entry),
            Command::BroadcastAll(report) => self.broadcast_all(&report).await,
            Command::BroadcastOne { target, report } => self.broadcast_one(target, &report).await,
            Command::MarkWithdrawalDone { target } => self.mark_withdrawal_done(target).await,
            Command::ListParticipants => self.list_participants(),
            Command::BlockParticipant { target } => self.block(target).await,
            Command::BroadcastFailureStatus => self.broadcast_failure().await,
            Command::SendDirect { target, text } => self.send_direct(target, &text).await,
            Command::SendBroadcastText { text } => self.send_broadcast_text(&text).await,
        };
        Some(reply)
    }

    fn reject(&self, principal: &Principal, rejected: &Rejected) -> Option<Reply> {
        match self.state.authorize(principal.id, rejected.kind) {
            Access::Denied(DenialReason::Blocked | DenialReason::NotOperator(Denial::Silent)) => {
                None
            }
            Access::Denied(DenialReason::NotOperator(Denial::Usage)) => {
                Some(Reply::text(rejected.kind.usage()))
            }
            Access::Admitted(_) => {
                debug!(
                    participant = %principal.id,
                    command = %rejected.kind,
                    reason = %rejected.reason,
                    "Rejected command arguments"
                );
                Some(Reply::text(format!(
                    "Invalid command: {}\n{}",
                    rejected.reason,
                    rejected.kind.usage()
                )))
            }
        }
    }
}
