//! Telegram command execution against the running relay.

use std::sync::Arc;

use teloxide::types::ChatId;

use crate::application::selftest::{run_self_test, summarize};
use crate::application::Dispatcher;

use super::auth::{resolve_message, Resolution};
use super::command::{command_help, TelegramCommand};

/// Runtime command executor for Telegram control commands.
///
/// Shares only the dispatcher with the poll task; the seen-set is never
/// touched from here.
#[derive(Clone)]
pub struct TelegramControl {
    dispatcher: Arc<Dispatcher>,
    admin_chats: Arc<[ChatId]>,
    bot_username: Option<Arc<str>>,
}

impl TelegramControl {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, admin_chats: Vec<i64>) -> Self {
        Self {
            dispatcher,
            admin_chats: admin_chats.into_iter().map(ChatId).collect(),
            bot_username: None,
        }
    }

    /// Only answer `/cmd@name` mentions addressed to `username`.
    #[must_use]
    pub fn with_bot_username(mut self, username: &str) -> Self {
        self.bot_username = Some(Arc::from(username));
        self
    }

    /// Response text for a message, or `None` when it should be ignored.
    pub async fn respond(&self, text: &str, chat: ChatId) -> Option<String> {
        match resolve_message(
            text,
            chat,
            &self.admin_chats,
            self.bot_username.as_deref(),
        )? {
            Resolution::Execute(command) => Some(self.execute(command, chat).await),
            Resolution::Reply(text) => Some(text),
        }
    }

    /// Execute one parsed command and return response text.
    pub async fn execute(&self, command: TelegramCommand, chat: ChatId) -> String {
        match command {
            TelegramCommand::Start | TelegramCommand::Help => command_help().to_string(),
            TelegramCommand::Id => format!("🆔 Chat ID: {}", chat.0),
            TelegramCommand::SelfTest => summarize(&run_self_test(&self.dispatcher).await),
        }
    }
}
