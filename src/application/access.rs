//! Access control gate evaluated before any mutation.

use tracing::{debug, warn};

use crate::domain::ParticipantId;
use crate::port::{CommandKind, Denial, Role};

use super::ledger::LedgerStore;

/// Result of [`AccessControl::authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Admitted(Role),
    Denied(DenialReason),
}

/// Why a principal was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Principal is in the block set; always silent.
    Blocked,
    /// Operator-only command from a non-operator.
    NotOperator(Denial),
}

/// Classifies principals against the configured operator and the block set.
#[derive(Debug, Clone, Copy)]
pub struct AccessControl {
    operator: ParticipantId,
}

impl AccessControl {
    #[must_use]
    pub const fn new(operator: ParticipantId) -> Self {
        Self { operator }
    }

    #[must_use]
    pub const fn operator(&self) -> ParticipantId {
        self.operator
    }

    #[must_use]
    pub fn is_operator(&self, id: ParticipantId) -> bool {
        id == self.operator
    }

    /// The operator identity is never treated as blocked.
    #[must_use]
    pub fn classify(&self, id: ParticipantId, ledger: &LedgerStore) -> Role {
        if self.is_operator(id) {
            Role::Operator
        } else if ledger.is_blocked(id) {
            Role::Blocked
        } else {
            Role::Participant
        }
    }

    /// Gate `kind` for `id`. Pure: logs but never mutates.
    #[must_use]
    pub fn authorize(&self, id: ParticipantId, kind: CommandKind, ledger: &LedgerStore) -> Access {
        match self.classify(id, ledger) {
            Role::Blocked => {
                debug!(participant = %id, command = %kind, "Ignoring command from blocked participant");
                Access::Denied(DenialReason::Blocked)
            }
            Role::Participant if kind.operator_only() => {
                warn!(participant = %id, command = %kind, "Operator command from non-operator");
                Access::Denied(DenialReason::NotOperator(kind.denial()))
            }
            role => Access::Admitted(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const OPERATOR: ParticipantId = ParticipantId::new(1000);

    fn ledger() -> LedgerStore {
        LedgerStore::new(dec!(200000))
    }

    #[test]
    fn operator_is_admitted_everywhere() {
        let access = AccessControl::new(OPERATOR);
        let ledger = ledger();
        for kind in [
            CommandKind::BroadcastAll,
            CommandKind::Block,
            CommandKind::Register,
            CommandKind::WithdrawGated,
        ] {
            assert_eq!(
                access.authorize(OPERATOR, kind, &ledger),
                Access::Admitted(Role::Operator)
            );
        }
    }

    #[test]
    fn participant_is_denied_operator_commands_per_policy() {
        let access = AccessControl::new(OPERATOR);
        let ledger = ledger();
        let user = ParticipantId::new(1);

        assert_eq!(
            access.authorize(user, CommandKind::BroadcastAll, &ledger),
            Access::Denied(DenialReason::NotOperator(Denial::Silent))
        );
        assert_eq!(
            access.authorize(user, CommandKind::SendDirect, &ledger),
            Access::Denied(DenialReason::NotOperator(Denial::Usage))
        );
        assert_eq!(
            access.authorize(user, CommandKind::DailyProfit, &ledger),
            Access::Admitted(Role::Participant)
        );
    }

    #[test]
    fn blocked_is_denied_even_read_only() {
        let access = AccessControl::new(OPERATOR);
        let mut ledger = ledger();
        let user = ParticipantId::new(1);
        ledger.register_or_refresh(user, "u");
        ledger.block(user);

        for kind in [
            CommandKind::Register,
            CommandKind::DailyProfit,
            CommandKind::MonthlyProfit,
            CommandKind::WithdrawInteractive,
            CommandKind::Help,
        ] {
            assert_eq!(
                access.authorize(user, kind, &ledger),
                Access::Denied(DenialReason::Blocked)
            );
        }
    }

    #[test]
    fn operator_cannot_be_classified_blocked() {
        let access = AccessControl::new(OPERATOR);
        let mut ledger = ledger();
        ledger.block(OPERATOR);
        assert_eq!(access.classify(OPERATOR, &ledger), Role::Operator);
    }
}
