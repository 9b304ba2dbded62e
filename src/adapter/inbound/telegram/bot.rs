//! Teloxide dispatcher feeding messages and menu callbacks into the ledger.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::Arc;

use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, User};
use tracing::{debug, error, info, warn};

use crate::port::{LedgerControl, Principal, Reply, MAIN_MENU};

use super::command::bot_commands;
use super::handler::{response_for_callback, response_for_text};

/// Options for [`run_bot`].
#[derive(Debug, Clone, Copy)]
pub struct BotOptions {
    /// Publish the "/" command menu on startup.
    pub register_commands: bool,
}

/// Serve updates until the dispatcher is stopped (Ctrl-C).
pub async fn run_bot(bot: Bot, control: Arc<dyn LedgerControl>, options: BotOptions) {
    if options.register_commands {
        if let Err(e) = register_bot_commands(&bot).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("Telegram listener started");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![control])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram listener stopped");
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    control: Arc<dyn LedgerControl>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Principal is the sender; in a group the chat is the group.
    let Some(sender) = msg.from.as_ref() else {
        debug!(chat_id = msg.chat.id.0, "Ignoring message without a sender");
        return Ok(());
    };
    let Some(principal) = principal_from_user(sender) else {
        warn!(user_id = sender.id.0, "Message from out-of-range user id");
        return Ok(());
    };

    if let Some(reply) = response_for_text(text, &principal, control.as_ref()).await {
        send_reply(&bot, msg.chat.id, reply).await;
    }
    Ok(())
}

async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    control: Arc<dyn LedgerControl>,
) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(principal) = principal_from_user(&query.from) else {
        warn!(user_id = query.from.id.0, "Callback from out-of-range user id");
        return Ok(());
    };

    let Some(reply) = response_for_callback(data, &principal, control.as_ref()).await else {
        return Ok(());
    };
    let menu = query.message.as_ref().map(|menu| (menu.chat().id, menu.id()));
    match callback_reply_target(ChatId(principal.id.value()), menu) {
        CallbackReplyTarget::Edit(chat_id, message_id) => {
            edit_reply(&bot, chat_id, message_id, reply).await;
        }
        CallbackReplyTarget::Send(chat_id) => send_reply(&bot, chat_id, reply).await,
    }
    Ok(())
}

/// Where the answer to a menu button goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallbackReplyTarget {
    /// Replace the text of the menu message the button sits on.
    Edit(ChatId, MessageId),
    /// The menu message is unavailable; write to the user directly.
    Send(ChatId),
}

fn callback_reply_target(
    user_chat: ChatId,
    menu: Option<(ChatId, MessageId)>,
) -> CallbackReplyTarget {
    match menu {
        Some((chat_id, message_id)) => CallbackReplyTarget::Edit(chat_id, message_id),
        None => CallbackReplyTarget::Send(user_chat),
    }
}

async fn edit_reply(bot: &Bot, chat_id: ChatId, message_id: MessageId, reply: Reply) {
    let request = bot.edit_message_text(chat_id, message_id, reply.text);
    let result = if reply.with_menu {
        request.reply_markup(main_menu()).await
    } else {
        request.await
    };
    if let Err(e) = result {
        warn!(chat_id = chat_id.0, error = %e, "Failed to edit menu message");
    }
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) {
    let request = bot.send_message(chat_id, reply.text);
    let result = if reply.with_menu {
        request.reply_markup(main_menu()).await
    } else {
        request.await
    };
    if let Err(e) = result {
        error!(chat_id = chat_id.0, error = %e, "Failed to send Telegram reply");
    }
}

/// Inline keyboard with one button per row.
fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        MAIN_MENU
            .iter()
            .map(|(label, data)| vec![InlineKeyboardButton::callback(*label, *data)]),
    )
}

fn principal_from_user(user: &User) -> Option<Principal> {
    let name = user.username.clone().unwrap_or_else(|| user.full_name());
    principal_for(user.id.0, name)
}

/// Principal for a Telegram user id, `None` if it does not fit an `i64`.
fn principal_for(user_id: u64, name: String) -> Option<Principal> {
    let id = i64::try_from(user_id).ok()?;
    Some(Principal::new(id, name))
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
