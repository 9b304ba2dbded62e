//! Process-wide monthly quota.

use serde::Serialize;

use super::money::{checked_sum, Amount, AmountOverflow};

/// Shared monthly ceiling on reported limit usage.
///
/// `consumed` only grows between resets. `remaining` is not clamped and goes
/// negative once usage passes the ceiling; operators read that as a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyQuota {
    ceiling: Amount,
    consumed: Amount,
}

impl MonthlyQuota {
    #[must_use]
    pub const fn new(ceiling: Amount) -> Self {
        Self {
            ceiling,
            consumed: Amount::ZERO,
        }
    }

    #[must_use]
    pub const fn ceiling(&self) -> Amount {
        self.ceiling
    }

    #[must_use]
    pub const fn consumed(&self) -> Amount {
        self.consumed
    }

    /// Ceiling minus consumed. May be negative.
    #[must_use]
    pub fn remaining(&self) -> Amount {
        self.ceiling - self.consumed
    }

    /// Add `amount` to consumed. Leaves the quota unchanged on overflow.
    pub fn consume(&mut self, amount: Amount) -> Result<(), AmountOverflow> {
        self.consumed = checked_sum(self.consumed, amount)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.consumed = Amount::ZERO;
    }
}
