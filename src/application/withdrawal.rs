//! Withdrawal workflow: one re-entrant pending flag per participant.
//!
//! ```text
//! NoRequest ──request──▶ Pending ──mark_done──▶ NoRequest
//!                          │  ▲
//!                          └──┘ request (already in progress)
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{days_until_first_of_next_month, is_withdrawal_day, ParticipantId};
use crate::port::WithdrawalEntry;

use super::ledger::LedgerStore;

/// Outcome of a withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalOutcome {
    /// A request was already open; nothing changed.
    AlreadyPending,
    /// A request is now open.
    Submitted { days_remaining: i64 },
    /// Day-gated entry used outside the 1st; nothing changed.
    NotYetOpen { days_remaining: i64 },
}

/// Effects applied by [`WithdrawalBook::mark_done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// The participant had an open request that is now cleared.
    pub cleared: bool,
    /// The process-wide monthly quota was reset. Always true: closing any
    /// withdrawal also closes the monthly quota cycle.
    pub quota_reset: bool,
}

/// Pending withdrawal flags keyed by participant.
#[derive(Debug, Default)]
pub struct WithdrawalBook {
    pending: BTreeSet<ParticipantId>,
}

impl WithdrawalBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a withdrawal on `today` through `entry`.
    pub fn request(
        &mut self,
        id: ParticipantId,
        today: NaiveDate,
        entry: WithdrawalEntry,
    ) -> WithdrawalOutcome {
        if self.pending.contains(&id) {
            return WithdrawalOutcome::AlreadyPending;
        }

        let days_remaining = days_until_first_of_next_month(today);
        if entry == WithdrawalEntry::Gated && !is_withdrawal_day(today) {
            return WithdrawalOutcome::NotYetOpen { days_remaining };
        }

        self.pending.insert(id);
        WithdrawalOutcome::Submitted { days_remaining }
    }

    #[must_use]
    pub fn is_pending(&self, id: ParticipantId) -> bool {
        self.pending.contains(&id)
    }

    /// Participants with an open request, in id order.
    pub fn pending(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.pending.iter().copied()
    }

    /// Close the participant's request and reset the monthly quota cycle.
    ///
    /// The quota reset is global and happens even when `id` had nothing
    /// pending. Other participants' requests are untouched.
    pub fn mark_done(&mut self, id: ParticipantId, ledger: &mut LedgerStore) -> Completion {
        let cleared = self.pending.remove(&id);
        ledger.reset_quota();
        Completion {
            cleared,
            quota_reset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pid(n: i64) -> ParticipantId {
        ParticipantId::new(n)
    }

    #[test]
    fn interactive_request_opens_on_any_day() {
        let mut book = WithdrawalBook::new();
        let outcome = book.request(pid(1), date(2024, 2, 15), WithdrawalEntry::Interactive);
        assert_eq!(outcome, WithdrawalOutcome::Submitted { days_remaining: 15 });
        assert!(book.is_pending(pid(1)));
    }

    #[test]
    fn second_request_reports_already_pending() {
        let mut book = WithdrawalBook::new();
        for entry in [WithdrawalEntry::Interactive, WithdrawalEntry::Gated] {
            let mut book_for_entry = WithdrawalBook::new();
            book_for_entry.request(pid(1), date(2024, 6, 1), entry);
            assert_eq!(
                book_for_entry.request(pid(1), date(2024, 6, 1), entry),
                WithdrawalOutcome::AlreadyPending
            );
            assert!(book_for_entry.is_pending(pid(1)));
        }

        book.request(pid(2), date(2024, 6, 10), WithdrawalEntry::Interactive);
        assert_eq!(
            book.request(pid(2), date(2024, 6, 10), WithdrawalEntry::Gated),
            WithdrawalOutcome::AlreadyPending
        );
    }

    #[test]
    fn gated_request_waits_for_the_first() {
        let mut book = WithdrawalBook::new();
        let outcome = book.request(pid(1), date(2024, 12, 31), WithdrawalEntry::Gated);
        assert_eq!(outcome, WithdrawalOutcome::NotYetOpen { days_remaining: 1 });
        assert!(!book.is_pending(pid(1)));

        let outcome = book.request(pid(1), date(2025, 1, 1), WithdrawalEntry::Gated);
        assert_eq!(outcome, WithdrawalOutcome::Submitted { days_remaining: 31 });
        assert!(book.is_pending(pid(1)));
    }

    #[test]
    fn mark_done_clears_only_the_target_and_resets_quota() {
        let mut ledger = LedgerStore::new(dec!(1000));
        ledger.consume_quota(dec!(800)).unwrap();
        let mut book = WithdrawalBook::new();
        book.request(pid(1), date(2024, 6, 5), WithdrawalEntry::Interactive);
        book.request(pid(2), date(2024, 6, 5), WithdrawalEntry::Interactive);

        let completion = book.mark_done(pid(1), &mut ledger);
        assert_eq!(
            completion,
            Completion {
                cleared: true,
                quota_reset: true
            }
        );
        assert!(!book.is_pending(pid(1)));
        assert!(book.is_pending(pid(2)));
        assert_eq!(ledger.quota().consumed(), dec!(0));
    }

    #[test]
    fn mark_done_without_request_still_resets_quota() {
        let mut ledger = LedgerStore::new(dec!(1000));
        ledger.consume_quota(dec!(300)).unwrap();
        let mut book = WithdrawalBook::new();

        let completion = book.mark_done(pid(5), &mut ledger);
        assert!(!completion.cleared);
        assert_eq!(ledger.quota().consumed(), dec!(0));
    }

    #[test]
    fn request_can_reopen_after_completion() {
        let mut ledger = LedgerStore::new(dec!(1000));
        let mut book = WithdrawalBook::new();
        book.request(pid(1), date(2024, 6, 5), WithdrawalEntry::Interactive);
        book.mark_done(pid(1), &mut ledger);
        assert!(matches!(
            book.request(pid(1), date(2024, 6, 6), WithdrawalEntry::Interactive),
            WithdrawalOutcome::Submitted { .. }
        ));
        assert_eq!(book.pending().collect::<Vec<_>>(), vec![pid(1)]);
    }
}
