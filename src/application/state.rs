//! Shared ledger state.

use parking_lot::Mutex;

use crate::domain::{Amount, ParticipantId};
use crate::port::{CommandKind, Role};

use super::access::{Access, AccessControl};
use super::ledger::LedgerStore;
use super::withdrawal::{Completion, WithdrawalBook};

/// Everything guarded by the state lock.
#[derive(Debug)]
pub struct Books {
    pub ledger: LedgerStore,
    pub withdrawals: WithdrawalBook,
}

impl Books {
    /// Close a withdrawal; see [`WithdrawalBook::mark_done`].
    pub fn mark_done(&mut self, id: ParticipantId) -> Completion {
        self.withdrawals.mark_done(id, &mut self.ledger)
    }
}

/// Process-wide ledger state.
///
/// A single mutex serializes every read-then-write on participants, the
/// quota, the block set and pending withdrawals. Access goes through
/// [`LedgerState::with`] so the guard cannot outlive the closure and is
/// never held across an `.await`.
pub struct LedgerState {
    books: Mutex<Books>,
    access: AccessControl,
}

impl LedgerState {
    #[must_use]
    pub fn new(operator: ParticipantId, monthly_ceiling: Amount) -> Self {
        Self {
            books: Mutex::new(Books {
                ledger: LedgerStore::new(monthly_ceiling),
                withdrawals: WithdrawalBook::new(),
            }),
            access: AccessControl::new(operator),
        }
    }

    #[must_use]
    pub const fn access(&self) -> AccessControl {
        self.access
    }

    /// Run `f` with exclusive access to the books.
    pub fn with<R>(&self, f: impl FnOnce(&mut Books) -> R) -> R {
        let mut books = self.books.lock();
        f(&mut books)
    }

    #[must_use]
    pub fn role_of(&self, id: ParticipantId) -> Role {
        self.with(|books| self.access.classify(id, &books.ledger))
    }

    #[must_use]
    pub fn authorize(&self, id: ParticipantId, kind: CommandKind) -> Access {
        self.with(|books| self.access.authorize(id, kind, &books.ledger))
    }
}
