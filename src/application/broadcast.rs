//! Broadcast dispatcher.
//!
//! Every broadcast runs in two phases. The planning phase takes the state
//! lock once, applies credits and the quota charge, and renders one message
//! per target from the post-mutation figures. The delivery phase runs with
//! the lock released and spawns one task per target, so a slow or hung send
//! holds up neither the rest of the batch nor unrelated commands.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{Amount, AmountOverflow, OrderStatus, ParticipantId};
use crate::error::DeliveryError;
use crate::port::{MessageTransport, StatusReport};

use super::message::MessageFormat;
use super::state::{Books, LedgerState};

/// Which participants a status broadcast reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targets {
    /// Every registered, non-blocked participant except the operator.
    All,
    /// A single participant.
    One(ParticipantId),
}

/// Why a status broadcast was refused before anything changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRefusal {
    /// The single target is blocked.
    Blocked(ParticipantId),
    /// A credit or the quota charge would leave the representable range.
    Overflow,
}

impl From<AmountOverflow> for StatusRefusal {
    fn from(_: AmountOverflow) -> Self {
        Self::Overflow
    }
}

/// One rendered message waiting for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: ParticipantId,
    pub text: String,
}

/// Outcome of a delivery batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    delivered: Vec<ParticipantId>,
    failed: Vec<DeliveryError>,
}

impl DeliveryReport {
    /// Participants that were reached, in id order.
    #[must_use]
    pub fn delivered(&self) -> &[ParticipantId] {
        &self.delivered
    }

    /// Failures, in participant id order.
    #[must_use]
    pub fn failed(&self) -> &[DeliveryError] {
        &self.failed
    }

    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    #[must_use]
    pub fn reached(&self, id: ParticipantId) -> bool {
        self.delivered.contains(&id)
    }
}

/// Fans messages out through a [`MessageTransport`].
#[derive(Clone)]
pub struct BroadcastDispatcher {
    transport: Arc<dyn MessageTransport>,
    format: MessageFormat,
}

impl BroadcastDispatcher {
    pub fn new(transport: Arc<dyn MessageTransport>, format: MessageFormat) -> Self {
        Self { transport, format }
    }

    #[must_use]
    pub fn format(&self) -> &MessageFormat {
        &self.format
    }

    /// Credit `report.profit` to each target, charge `report.quota_used`
    /// once, then notify every target.
    ///
    /// Blocked participants are skipped by [`Targets::All`]; a blocked
    /// [`Targets::One`] or an out-of-range sum refuses the whole broadcast
    /// with the ledger unchanged. Failed deliveries are logged and reported
    /// but never roll back the credits or the quota charge.
    pub async fn broadcast_status(
        &self,
        state: &LedgerState,
        targets: Targets,
        report: &StatusReport,
        at: NaiveDateTime,
    ) -> Result<DeliveryReport, StatusRefusal> {
        let operator = state.access().operator();
        let batch =
            state.with(|books| self.plan_status(books, operator, targets, report, at))?;
        Ok(self.dispatch(batch).await)
    }

    /// Send the fixed zero-figure failure status to every non-blocked
    /// participant. Leaves the ledger untouched.
    pub async fn broadcast_failure(&self, state: &LedgerState, at: NaiveDateTime) -> DeliveryReport {
        let batch = state.with(|books| {
            let quota = books.ledger.quota();
            books
                .ledger
                .active_ids()
                .map(|id| Outgoing {
                    to: id,
                    text: self.format.status(
                        OrderStatus::Failed,
                        at,
                        Amount::ZERO,
                        quota,
                        None,
                        books.ledger.lifetime_profit(id),
                    ),
                })
                .collect::<Vec<_>>()
        });
        self.dispatch(batch).await
    }

    /// Send `text` verbatim to every non-blocked participant.
    pub async fn broadcast_text(&self, state: &LedgerState, text: &str) -> DeliveryReport {
        let batch = state.with(|books| {
            books
                .ledger
                .active_ids()
                .map(|id| Outgoing {
                    to: id,
                    text: text.to_string(),
                })
                .collect::<Vec<_>>()
        });
        self.dispatch(batch).await
    }

    /// Deliver a single message directly.
    pub async fn send(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError> {
        let result = self.transport.deliver(to, text).await;
        if let Err(err) = &result {
            warn!(participant = %to, error = %err.reason, "Direct delivery failed");
        }
        result
    }

    fn plan_status(
        &self,
        books: &mut Books,
        operator: ParticipantId,
        targets: Targets,
        report: &StatusReport,
        at: NaiveDateTime,
    ) -> Result<Vec<Outgoing>, StatusRefusal> {
        let recipients: Vec<ParticipantId> = match targets {
            Targets::All => books
                .ledger
                .active_ids()
                .filter(|id| *id != operator)
                .collect(),
            Targets::One(id) if books.ledger.is_blocked(id) => {
                return Err(StatusRefusal::Blocked(id));
            }
            Targets::One(id) => vec![id],
        };

        // Checked up front so the charge and credits land together or not at all.
        books
            .ledger
            .check_status_update(&recipients, report.profit, report.quota_used)?;
        books.ledger.consume_quota(report.quota_used)?;
        for id in &recipients {
            books.ledger.credit_profit(*id, report.profit)?;
        }

        let quota = books.ledger.quota();
        Ok(recipients
            .into_iter()
            .map(|id| Outgoing {
                to: id,
                text: self.format.status(
                    OrderStatus::Complete,
                    at,
                    report.profit,
                    quota,
                    report.note.as_deref(),
                    books.ledger.lifetime_profit(id),
                ),
            })
            .collect())
    }

    /// Deliver a planned batch, one task per message.
    pub async fn dispatch(&self, batch: Vec<Outgoing>) -> DeliveryReport {
        let batch_id = Uuid::new_v4();
        let total = batch.len();
        debug!(%batch_id, total, "Dispatching batch");

        let mut tasks = JoinSet::new();
        for Outgoing { to, text } in batch {
            let transport = Arc::clone(&self.transport);
            tasks.spawn(async move { transport.deliver(to, &text).await.map(|()| to) });
        }

        let mut report = DeliveryReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(id)) => report.delivered.push(id),
                Ok(Err(err)) => {
                    warn!(
                        %batch_id,
                        participant = %err.participant,
                        error = %err.reason,
                        "Delivery failed; skipping participant"
                    );
                    report.failed.push(err);
                }
                Err(join_err) => {
                    warn!(%batch_id, error = %join_err, "Delivery task aborted");
                }
            }
        }

        report.delivered.sort_unstable();
        report.failed.sort_by_key(|err| err.participant);
        info!(
            %batch_id,
            total,
            delivered = report.delivered_count(),
            failed = report.failed_count(),
            "Batch dispatched"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    const OPERATOR: ParticipantId = ParticipantId::new(1000);

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(ParticipantId, String)>>,
        fail_for: Vec<ParticipantId>,
    }

    #[async_trait]
    impl MessageTransport for Recorder {
        async fn deliver(&self, to: ParticipantId, text: &str) -> Result<(), DeliveryError> {
            if self.fail_for.contains(&to) {
                return Err(DeliveryError::new(to, "chat not found"));
            }
            self.sent.lock().push((to, text.to_string()));
            Ok(())
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn pid(n: i64) -> ParticipantId {
        ParticipantId::new(n)
    }

    fn state_with(ids: &[i64]) -> LedgerState {
        let state = LedgerState::new(OPERATOR, dec!(200000));
        state.with(|b| {
            for id in ids {
                b.ledger.register_or_refresh(pid(*id), format!("p{id}"));
            }
        });
        state
    }

    fn report(profit: rust_decimal::Decimal, used: rust_decimal::Decimal) -> StatusReport {
        StatusReport {
            profit,
            quota_used: used,
            note: None,
        }
    }

    #[tokio::test]
    async fn broadcast_all_charges_quota_once_and_skips_blocked() {
        let state = state_with(&[1, 2, 3]);
        state.with(|b| b.ledger.block(pid(2)));
        let recorder = Arc::new(Recorder::default());
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let delivery = dispatcher
            .broadcast_status(&state, Targets::All, &report(dec!(500), dec!(1000)), at())
            .await
            .unwrap();

        assert_eq!(delivery.delivered(), &[pid(1), pid(3)]);
        state.with(|b| {
            assert_eq!(b.ledger.lifetime_profit(pid(1)), dec!(500));
            assert_eq!(b.ledger.lifetime_profit(pid(2)), dec!(0));
            assert_eq!(b.ledger.lifetime_profit(pid(3)), dec!(500));
            assert_eq!(b.ledger.quota().consumed(), dec!(1000));
        });
        let sent = recorder.sent.lock();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, text)| text.contains("₹199,000 / ₹200,000")));
    }

    #[tokio::test]
    async fn broadcast_all_excludes_operator() {
        let state = state_with(&[1, OPERATOR.value()]);
        let recorder = Arc::new(Recorder::default());
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let delivery = dispatcher
            .broadcast_status(&state, Targets::All, &report(dec!(10), dec!(0)), at())
            .await
            .unwrap();

        assert_eq!(delivery.delivered(), &[pid(1)]);
        assert_eq!(state.with(|b| b.ledger.lifetime_profit(OPERATOR)), dec!(0));
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let state = state_with(&[1, 2, 3]);
        let recorder = Arc::new(Recorder {
            fail_for: vec![pid(2)],
            ..Recorder::default()
        });
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let delivery = dispatcher
            .broadcast_status(&state, Targets::All, &report(dec!(100), dec!(50)), at())
            .await
            .unwrap();

        assert_eq!(delivery.delivered(), &[pid(1), pid(3)]);
        assert_eq!(delivery.failed_count(), 1);
        assert_eq!(delivery.failed()[0].participant, pid(2));
        // Credits are not rolled back for the failed target.
        assert_eq!(state.with(|b| b.ledger.lifetime_profit(pid(2))), dec!(100));
    }

    #[tokio::test]
    async fn failure_status_leaves_ledger_untouched() {
        let state = state_with(&[1, 2]);
        state.with(|b| {
            b.ledger.credit_profit(pid(1), dec!(70)).unwrap();
            b.ledger.consume_quota(dec!(30)).unwrap();
        });
        let recorder = Arc::new(Recorder::default());
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let delivery = dispatcher.broadcast_failure(&state, at()).await;

        assert_eq!(delivery.delivered_count(), 2);
        state.with(|b| {
            assert_eq!(b.ledger.lifetime_profit(pid(1)), dec!(70));
            assert_eq!(b.ledger.quota().consumed(), dec!(30));
        });
        let sent = recorder.sent.lock();
        assert!(sent.iter().all(|(_, text)| text.contains("Failed 🚫")));
        assert!(sent
            .iter()
            .any(|(id, text)| *id == pid(1) && text.contains("Lifetime Profit: ₹70")));
    }

    #[tokio::test]
    async fn one_target_to_blocked_participant_is_refused_without_charge() {
        let state = state_with(&[1]);
        state.with(|b| b.ledger.block(pid(1)));
        let recorder = Arc::new(Recorder::default());
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let refused = dispatcher
            .broadcast_status(&state, Targets::One(pid(1)), &report(dec!(5), dec!(5)), at())
            .await;

        assert_eq!(refused.unwrap_err(), StatusRefusal::Blocked(pid(1)));
        state.with(|b| {
            assert_eq!(b.ledger.lifetime_profit(pid(1)), dec!(0));
            assert_eq!(b.ledger.quota().consumed(), dec!(0));
        });
        assert!(recorder.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn overflowing_broadcast_changes_nothing_and_sends_nothing() {
        let state = state_with(&[1, 2]);
        state.with(|b| b.ledger.credit_profit(pid(2), Amount::MAX).unwrap());
        let recorder = Arc::new(Recorder::default());
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let refused = dispatcher
            .broadcast_status(&state, Targets::All, &report(dec!(1), dec!(40)), at())
            .await;

        assert_eq!(refused.unwrap_err(), StatusRefusal::Overflow);
        state.with(|b| {
            // Recipient 1 comes first in id order and must not be credited alone.
            assert_eq!(b.ledger.lifetime_profit(pid(1)), dec!(0));
            assert_eq!(b.ledger.lifetime_profit(pid(2)), Amount::MAX);
            assert_eq!(b.ledger.quota().consumed(), dec!(0));
        });
        assert!(recorder.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn text_broadcast_counts_deliveries() {
        let state = state_with(&[1, 2, 3]);
        state.with(|b| b.ledger.block(pid(3)));
        let recorder = Arc::new(Recorder {
            fail_for: vec![pid(1)],
            ..Recorder::default()
        });
        let dispatcher = BroadcastDispatcher::new(recorder.clone(), MessageFormat::default());

        let delivery = dispatcher.broadcast_text(&state, "hello").await;
        assert_eq!(delivery.delivered(), &[pid(2)]);
        assert_eq!(delivery.attempted(), 2);
    }
}
