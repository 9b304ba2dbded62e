//! Ledger store: participants, lifetime profit, the monthly quota and the
//! block set.
//!
//! The store itself is plain data with no locking; [`super::state::LedgerState`]
//! owns it behind a mutex so every read-then-write runs as one critical
//! section.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{checked_sum, Amount, AmountOverflow, MonthlyQuota, Participant, ParticipantId};

/// Result of [`LedgerStore::register_or_refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First time this participant was seen.
    New,
    /// Participant already existed; display name and session figures refreshed.
    Refreshed,
}

/// Per-participant figures and the process-wide quota.
#[derive(Debug)]
pub struct LedgerStore {
    participants: BTreeMap<ParticipantId, Participant>,
    lifetime: HashMap<ParticipantId, Amount>,
    quota: MonthlyQuota,
    blocked: HashSet<ParticipantId>,
}

impl LedgerStore {
    #[must_use]
    pub fn new(monthly_ceiling: Amount) -> Self {
        Self {
            participants: BTreeMap::new(),
            lifetime: HashMap::new(),
            quota: MonthlyQuota::new(monthly_ceiling),
            blocked: HashSet::new(),
        }
    }

    /// Insert a participant or refresh an existing one.
    ///
    /// Refreshing overwrites the display name and zeroes the daily and
    /// monthly figures. Lifetime profit is never touched.
    pub fn register_or_refresh(
        &mut self,
        id: ParticipantId,
        display_name: impl Into<String>,
    ) -> Registration {
        let display_name = display_name.into();
        match self.participants.get_mut(&id) {
            Some(existing) => {
                existing.refresh(display_name);
                Registration::Refreshed
            }
            None => {
                self.participants
                    .insert(id, Participant::new(id, display_name));
                Registration::New
            }
        }
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    #[must_use]
    pub fn is_registered(&self, id: ParticipantId) -> bool {
        self.participants.contains_key(&id)
    }

    /// Registered participants in id order, blocked ones included.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Registered participants that are not blocked, in id order.
    pub fn active_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants
            .keys()
            .copied()
            .filter(|id| !self.blocked.contains(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Add `amount` to the participant's lifetime profit.
    ///
    /// No-op for blocked participants. Returns whether the credit applied.
    /// Identities that never registered are still credited, matching the
    /// operator's ability to report profit ahead of a `/start`. On overflow
    /// neither figure changes.
    pub fn credit_profit(
        &mut self,
        id: ParticipantId,
        amount: Amount,
    ) -> Result<bool, AmountOverflow> {
        if self.blocked.contains(&id) {
            debug!(participant = %id, "Skipping credit for blocked participant");
            return Ok(false);
        }
        let lifetime = checked_sum(self.lifetime_profit(id), amount)?;
        if let Some(participant) = self.participants.get_mut(&id) {
            participant.record_credit(amount)?;
        }
        self.lifetime.insert(id, lifetime);
        Ok(true)
    }

    /// Check that crediting `profit` to each of `recipients` and charging
    /// `quota_used` once would stay in range, without changing anything.
    pub fn check_status_update(
        &self,
        recipients: &[ParticipantId],
        profit: Amount,
        quota_used: Amount,
    ) -> Result<(), AmountOverflow> {
        checked_sum(self.quota.consumed(), quota_used)?;
        for id in recipients.iter().filter(|id| !self.is_blocked(**id)) {
            checked_sum(self.lifetime_profit(*id), profit)?;
            if let Some(participant) = self.participants.get(id) {
                checked_sum(participant.monthly_profit(), profit)?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn lifetime_profit(&self, id: ParticipantId) -> Amount {
        self.lifetime.get(&id).copied().unwrap_or(Amount::ZERO)
    }

    /// Charge the shared monthly quota, regardless of who triggered it.
    pub fn consume_quota(&mut self, amount: Amount) -> Result<(), AmountOverflow> {
        self.quota.consume(amount)
    }

    pub fn reset_quota(&mut self) {
        self.quota.reset();
    }

    /// Ceiling minus consumed; may be negative.
    #[must_use]
    pub fn remaining(&self) -> Amount {
        self.quota.remaining()
    }

    #[must_use]
    pub const fn quota(&self) -> MonthlyQuota {
        self.quota
    }

    /// Add to the block set. Membership is permanent. Returns `true` if newly blocked.
    pub fn block(&mut self, id: ParticipantId) -> bool {
        self.blocked.insert(id)
    }

    #[must_use]
    pub fn is_blocked(&self, id: ParticipantId) -> bool {
        self.blocked.contains(&id)
    }
}
