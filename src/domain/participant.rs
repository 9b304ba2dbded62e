//! Participant records owned by the ledger.

use serde::Serialize;

use super::id::ParticipantId;
use super::money::{checked_sum, Amount, AmountOverflow};

/// A registered participant.
///
/// Lifetime profit is tracked separately by the ledger so that it survives
/// re-registration; the fields here are the per-session view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    id: ParticipantId,
    display_name: String,
    daily_profit: Amount,
    monthly_profit: Amount,
}

impl Participant {
    /// Create a freshly registered participant with zeroed session figures.
    pub fn new(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            daily_profit: Amount::ZERO,
            monthly_profit: Amount::ZERO,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Last-known daily profit.
    #[must_use]
    pub const fn daily_profit(&self) -> Amount {
        self.daily_profit
    }

    /// Last-known monthly profit.
    #[must_use]
    pub const fn monthly_profit(&self) -> Amount {
        self.monthly_profit
    }

    /// Record a credited broadcast: the daily figure becomes the latest
    /// amount and the monthly figure accumulates. Nothing changes on overflow.
    pub fn record_credit(&mut self, amount: Amount) -> Result<(), AmountOverflow> {
        self.monthly_profit = checked_sum(self.monthly_profit, amount)?;
        self.daily_profit = amount;
        Ok(())
    }

    /// Refresh the display name and zero the session figures.
    pub(crate) fn refresh(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
        self.daily_profit = Amount::ZERO;
        self.monthly_profit = Amount::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_participant_starts_at_zero() {
        let p = Participant::new(ParticipantId::new(7), "alice");
        assert_eq!(p.daily_profit(), dec!(0));
        assert_eq!(p.monthly_profit(), dec!(0));
        assert_eq!(p.display_name(), "alice");
    }

    #[test]
    fn record_credit_sets_daily_and_accumulates_monthly() {
        let mut p = Participant::new(ParticipantId::new(7), "alice");
        p.record_credit(dec!(500)).unwrap();
        p.record_credit(dec!(300)).unwrap();
        assert_eq!(p.daily_profit(), dec!(300));
        assert_eq!(p.monthly_profit(), dec!(800));
    }

    #[test]
    fn refresh_overwrites_session_figures() {
        let mut p = Participant::new(ParticipantId::new(7), "alice");
        p.record_credit(dec!(500)).unwrap();
        p.refresh("alice_renamed");
        assert_eq!(p.display_name(), "alice_renamed");
        assert_eq!(p.daily_profit(), dec!(0));
        assert_eq!(p.monthly_profit(), dec!(0));
    }

    #[test]
    fn overflowing_credit_changes_nothing() {
        let mut p = Participant::new(ParticipantId::new(7), "alice");
        p.record_credit(Amount::MAX).unwrap();
        p.record_credit(dec!(5)).unwrap_err();
        assert_eq!(p.daily_profit(), Amount::MAX);
        assert_eq!(p.monthly_profit(), Amount::MAX);
    }
}
