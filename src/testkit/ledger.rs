//! Fully wired ledger service for tests.

use std::sync::Arc;

use crate::application::{LedgerService, LedgerSettings};
use crate::port::{Command, LedgerControl, Principal, Reply};

use super::clock::FixedClock;
use super::config;
use super::transport::RecordingTransport;

/// A [`LedgerService`] plus handles on its transport and clock.
pub struct TestLedger {
    pub service: Arc<LedgerService>,
    pub transport: Arc<RecordingTransport>,
    pub clock: Arc<FixedClock>,
}

impl TestLedger {
    /// Canonical settings, clock at 05-Jun-2024 09:30.
    pub fn new() -> Self {
        Self::with_settings(config::settings(), RecordingTransport::new())
    }

    pub fn with_settings(settings: LedgerSettings, transport: RecordingTransport) -> Self {
        let transport = Arc::new(transport);
        let clock = Arc::new(FixedClock::at(2024, 6, 5, 9, 30));
        let service = Arc::new(LedgerService::new(
            settings,
            Arc::clone(&transport) as _,
            Arc::clone(&clock) as _,
        ));
        Self {
            service,
            transport,
            clock,
        }
    }

    pub fn operator(&self) -> Principal {
        Principal::new(config::OPERATOR, "operator")
    }

    /// Principal for a participant id, named `user<id>`.
    pub fn user(&self, id: i64) -> Principal {
        Principal::new(id, format!("user{id}"))
    }

    /// Register `ids` via `/start`.
    pub async fn register(&self, ids: &[i64]) {
        for &id in ids {
            self.service.execute(&self.user(id), Command::Register).await;
        }
    }

    pub async fn run(&self, principal: &Principal, command: Command) -> Option<Reply> {
        self.service.execute(principal, command).await
    }

    /// Run an operator command and return its reply text.
    pub async fn operator_run(&self, command: Command) -> String {
        self.run(&self.operator(), command)
            .await
            .map(|reply| reply.text)
            .unwrap_or_default()
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}
