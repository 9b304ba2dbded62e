//! Routing of raw Telegram input into the ledger.

use tracing::debug;

use crate::port::{LedgerControl, Principal, Reply};

use super::command::{parse_callback, parse_command, CommandParseError};

/// Process a text message and return the reply to send, if any.
///
/// Returns `None` for:
/// - Messages that are not commands (don't start with `/`)
/// - Unknown commands
/// - Commands the principal is not allowed to see an answer for
pub async fn response_for_text(
    text: &str,
    principal: &Principal,
    control: &dyn LedgerControl,
) -> Option<Reply> {
    match parse_command(text) {
        Ok(command) => control.execute(principal, command).await,
        Err(CommandParseError::NotACommand) => None,
        Err(CommandParseError::UnknownCommand(command)) => {
            debug!(participant = %principal.id, %command, "Ignoring unknown command");
            None
        }
        Err(CommandParseError::Invalid(rejected)) => control.reject(principal, &rejected),
    }
}

/// Process inline-keyboard callback data.
pub async fn response_for_callback(
    data: &str,
    principal: &Principal,
    control: &dyn LedgerControl,
) -> Option<Reply> {
    let Some(command) = parse_callback(data) else {
        debug!(participant = %principal.id, data, "Ignoring unknown callback");
        return None;
    };
    control.execute(principal, command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::message;
    use crate::domain::ParticipantId;
    use crate::port::Command;
    use crate::testkit::ledger::TestLedger;

    async fn text(ledger: &TestLedger, principal: &Principal, input: &str) -> Option<String> {
        response_for_text(input, principal, ledger.service.as_ref())
            .await
            .map(|reply| reply.text)
    }

    // -------------------------------------------------------------------------
    // Participant input
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn start_replies_with_menu() {
        let ledger = TestLedger::new();
        let reply = response_for_text("/start", &ledger.user(7), ledger.service.as_ref())
            .await
            .unwrap();
        assert!(reply.with_menu);
        assert_eq!(reply.text, message::WELCOME);
    }

    #[tokio::test]
    async fn plain_text_and_unknown_commands_are_ignored() {
        let ledger = TestLedger::new();
        let user = ledger.user(7);
        assert!(text(&ledger, &user, "hello").await.is_none());
        assert!(text(&ledger, &user, "").await.is_none());
        assert!(text(&ledger, &user, "/unknown").await.is_none());
        assert!(text(&ledger, &ledger.operator(), "/unknown").await.is_none());
    }

    #[tokio::test]
    async fn command_with_bot_mention_and_whitespace() {
        let ledger = TestLedger::new();
        let user = ledger.user(7);
        let reply = text(&ledger, &user, "  /start@ledger_bot  ").await.unwrap();
        assert_eq!(reply, message::WELCOME);
    }

    // -------------------------------------------------------------------------
    // Operator-only commands from non-operators
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn non_operator_gets_silence_for_silent_commands() {
        let ledger = TestLedger::new();
        let user = ledger.user(7);
        ledger.register(&[7]).await;
        for input in [
            "/broadcast_all 100 50",
            "/withdraw_done 7",
            "/users",
            "/block 8",
            "/status_fail",
        ] {
            assert!(text(&ledger, &user, input).await.is_none(), "{input}");
        }
        assert!(ledger.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn non_operator_gets_usage_for_usage_commands() {
        let ledger = TestLedger::new();
        let user = ledger.user(7);
        let reply = text(&ledger, &user, "/send_message 8 hi").await.unwrap();
        assert!(reply.starts_with("Usage: /send_message"));

        // Malformed arguments from a non-operator still only show usage.
        let reply = text(&ledger, &user, "/broadcast_user x").await.unwrap();
        assert!(reply.starts_with("Usage: /broadcast_user"));

        assert!(text(&ledger, &user, "/block x").await.is_none());
    }

    // -------------------------------------------------------------------------
    // Operator argument errors
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn operator_sees_reason_and_usage_for_bad_arguments() {
        let ledger = TestLedger::new();
        let operator = ledger.operator();

        let reply = text(&ledger, &operator, "/broadcast_all abc 10").await.unwrap();
        assert!(reply.contains("Invalid command"));
        assert!(reply.contains("invalid amount `abc`"));
        assert!(reply.contains("Usage: /broadcast_all"));

        let reply = text(&ledger, &operator, "/block").await.unwrap();
        assert!(reply.contains("missing argument `user_id`"));
    }

    #[tokio::test]
    async fn rejected_arguments_do_not_touch_the_ledger() {
        let ledger = TestLedger::new();
        ledger.register(&[7]).await;
        text(&ledger, &ledger.operator(), "/broadcast_all 10").await;
        let consumed = ledger
            .service
            .state()
            .with(|books| books.ledger.quota().consumed());
        assert!(consumed.is_zero());
        assert!(ledger.transport.sent().is_empty());
    }

    // -------------------------------------------------------------------------
    // Callbacks
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn withdraw_button_opens_request_any_day() {
        let ledger = TestLedger::new();
        let user = ledger.user(7);
        ledger.register(&[7]).await;

        let reply = response_for_callback("withdraw", &user, ledger.service.as_ref())
            .await
            .unwrap();
        assert!(reply.text.contains("26 day(s)"), "{}", reply.text);

        let pending = ledger
            .service
            .state()
            .with(|books| books.withdrawals.is_pending(ParticipantId::new(7)));
        assert!(pending);
    }

    #[tokio::test]
    async fn unknown_callback_is_ignored() {
        let ledger = TestLedger::new();
        let reply = response_for_callback("nope", &ledger.user(7), ledger.service.as_ref()).await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn blocked_principal_gets_nothing() {
        let ledger = TestLedger::new();
        ledger.register(&[7]).await;
        ledger
            .run(
                &ledger.operator(),
                Command::BlockParticipant {
                    target: ParticipantId::new(7),
                },
            )
            .await;
        let user = ledger.user(7);
        assert!(text(&ledger, &user, "/start").await.is_none());
        assert!(text(&ledger, &user, "/broadcast_all x").await.is_none());
        let reply =
            response_for_callback("check_daily_profit", &user, ledger.service.as_ref()).await;
        assert!(reply.is_none());
    }
}
