//! Authorization for Telegram command handling.

use teloxide::types::ChatId;
use tracing::warn;

use super::command::{command_help, parse_command, CommandParseError, TelegramCommand};

/// What to do with an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run an authorized command.
    Execute(TelegramCommand),
    /// Reply with fixed text without running anything.
    Reply(String),
}

/// Decide how to answer a message.
///
/// Returns `None` for:
/// - Messages that are not commands, or commands for another bot
/// - Restricted commands from chats outside `admin_chats`
///
/// An empty `admin_chats` list leaves every command open.
pub fn resolve_message(
    text: &str,
    incoming_chat: ChatId,
    admin_chats: &[ChatId],
    bot_username: Option<&str>,
) -> Option<Resolution> {
    match parse_command(text, bot_username) {
        Ok(command) if command.is_restricted() && !is_admin_chat(incoming_chat, admin_chats) => {
            None
        }
        Ok(command) => Some(Resolution::Execute(command)),
        Err(CommandParseError::NotACommand) => None,
        Err(err) => Some(Resolution::Reply(format!(
            "Invalid command: {err}\n\n{}",
            command_help()
        ))),
    }
}

/// Check if a chat may run restricted commands.
fn is_admin_chat(incoming_chat: ChatId, admin_chats: &[ChatId]) -> bool {
    if admin_chats.is_empty() || admin_chats.contains(&incoming_chat) {
        return true;
    }

    warn!(
        chat_id = incoming_chat.0,
        "Ignoring restricted command from non-admin chat"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: ChatId = ChatId(42);

    #[test]
    fn id_is_allowed_from_any_chat() {
        for chat in [ADMIN, ChatId(7), ChatId(-1001234567890)] {
            assert_eq!(
                resolve_message("/id", chat, &[ADMIN], None),
                Some(Resolution::Execute(TelegramCommand::Id))
            );
        }
    }

    #[test]
    fn self_test_is_limited_to_admin_chats() {
        assert_eq!(
            resolve_message("/chk", ADMIN, &[ADMIN], None),
            Some(Resolution::Execute(TelegramCommand::SelfTest))
        );
        assert_eq!(resolve_message("/chk", ChatId(7), &[ADMIN], None), None);
        assert_eq!(resolve_message(".chk", ChatId(-100), &[ADMIN], None), None);
    }

    #[test]
    fn empty_admin_list_allows_self_test_everywhere() {
        assert_eq!(
            resolve_message("/chk", ChatId(7), &[], None),
            Some(Resolution::Execute(TelegramCommand::SelfTest))
        );
    }

    #[test]
    fn negative_group_ids_match_exactly() {
        let group = ChatId(-123_456_789);
        assert!(resolve_message("/chk", group, &[group], None).is_some());
        assert!(resolve_message("/chk", ChatId(-987_654_321), &[group], None).is_none());
    }

    #[test]
    fn unknown_command_replies_with_help() {
        let Some(Resolution::Reply(text)) = resolve_message("/bad", ChatId(7), &[ADMIN], None) else {
            panic!("expected a reply");
        };
        assert!(text.contains("Invalid command"));
        assert!(text.contains("unknown command"));
        assert!(text.contains("/id"));
    }

    #[test]
    fn plain_text_is_ignored() {
        assert_eq!(resolve_message("hello", ADMIN, &[], None), None);
        assert_eq!(resolve_message("", ADMIN, &[], None), None);
        assert_eq!(resolve_message("   ", ADMIN, &[], None), None);
    }

    #[test]
    fn foreign_bot_mentions_stay_silent() {
        let own = Some("otprelay_bot");
        assert_eq!(resolve_message("/foo@otherbot", ChatId(7), &[], own), None);
        assert_eq!(resolve_message("/id@otherbot", ChatId(7), &[], own), None);
        assert_eq!(
            resolve_message("/id@otprelay_bot", ChatId(7), &[], own),
            Some(Resolution::Execute(TelegramCommand::Id))
        );
    }
}
