//! Telegram command parsing.

use thiserror::Error;

/// Supported Telegram commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    /// Reply with the current chat's identifier.
    Id,
    /// Send a sample notification to every channel.
    SelfTest,
}

impl TelegramCommand {
    /// Whether the command is limited to admin chats.
    #[must_use]
    pub const fn is_restricted(self) -> bool {
        matches!(self, Self::SelfTest)
    }
}

/// Parse error for Telegram command messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("message is not a command")]
    NotACommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

/// Parse a Telegram message into a bot command.
///
/// Both `/cmd` and the `.cmd` shorthand are accepted. An `@botname` suffix
/// must name `bot_username` when it is known; commands addressed to other
/// bots in a group are not ours. Unknown `.` words are treated as plain text
/// so ordinary messages starting with a dot stay silent.
pub fn parse_command(
    text: &str,
    bot_username: Option<&str>,
) -> Result<TelegramCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };

    let command = match raw_command.split_once('@') {
        Some((head, mention)) => match bot_username {
            Some(own) if !mention.eq_ignore_ascii_case(own) => {
                return Err(CommandParseError::NotACommand)
            }
            _ => head,
        },
        None => raw_command,
    };

    let (name, dotted) = if let Some(name) = command.strip_prefix('/') {
        (name, false)
    } else if let Some(name) = command.strip_prefix('.') {
        (name, true)
    } else {
        return Err(CommandParseError::NotACommand);
    };

    match name {
        "start" => Ok(TelegramCommand::Start),
        "help" => Ok(TelegramCommand::Help),
        "id" => Ok(TelegramCommand::Id),
        "chk" => Ok(TelegramCommand::SelfTest),
        _ if dotted => Err(CommandParseError::NotACommand),
        _ => Err(CommandParseError::UnknownCommand(command.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /id - 🆔 Show this chat's ID\n\
    /chk - 🧪 Send a test notification to every channel\n\
    /help - 📖 Show all commands\n\n\
    The .id and .chk shorthands work too."
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("id", "Show this chat's ID"),
        ("chk", "Send a test notification to every channel"),
        ("help", "Show all commands"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_commands() {
        assert_eq!(parse_command("/start", None).unwrap(), TelegramCommand::Start);
        assert_eq!(parse_command("/help", None).unwrap(), TelegramCommand::Help);
        assert_eq!(parse_command("/id", None).unwrap(), TelegramCommand::Id);
        assert_eq!(parse_command("/chk", None).unwrap(), TelegramCommand::SelfTest);
    }

    #[test]
    fn parse_dot_shorthand() {
        assert_eq!(parse_command(".id", None).unwrap(), TelegramCommand::Id);
        assert_eq!(parse_command(".chk", None).unwrap(), TelegramCommand::SelfTest);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/id@otprelay_bot", Some("otprelay_bot")).unwrap(),
            TelegramCommand::Id
        );
        assert_eq!(
            parse_command("/chk@OTPRelay_Bot", Some("otprelay_bot")).unwrap(),
            TelegramCommand::SelfTest
        );
        assert_eq!(
            parse_command("/chk@another_bot_123", None).unwrap(),
            TelegramCommand::SelfTest
        );
    }

    #[test]
    fn commands_for_other_bots_are_not_ours() {
        for text in ["/id@otherbot", "/foo@otherbot", ".chk@otherbot extra"] {
            assert_eq!(
                parse_command(text, Some("otprelay_bot")),
                Err(CommandParseError::NotACommand),
                "{text}"
            );
        }
    }

    #[test]
    fn parse_ignores_trailing_arguments_and_whitespace() {
        assert_eq!(parse_command("  /id  extra", None).unwrap(), TelegramCommand::Id);
        assert_eq!(parse_command("/chk\tnow", None).unwrap(), TelegramCommand::SelfTest);
    }

    #[test]
    fn parse_not_a_command() {
        for text in ["hello", "", "   ", "id"] {
            assert_eq!(
                parse_command(text, None),
                Err(CommandParseError::NotACommand),
                "{text:?}"
            );
        }
    }

    #[test]
    fn parse_unknown_dot_word_is_plain_text() {
        assert_eq!(parse_command("...", None), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command(".status", None), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn parse_unknown_slash_command() {
        let err = parse_command("/status", None).unwrap_err();
        assert_eq!(err, CommandParseError::UnknownCommand("/status".into()));
        assert_eq!(err.to_string(), "unknown command `/status`");
    }

    #[test]
    fn parse_command_case_sensitivity() {
        assert!(matches!(
            parse_command("/ID", None),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn only_self_test_is_restricted() {
        assert!(TelegramCommand::SelfTest.is_restricted());
        assert!(!TelegramCommand::Id.is_restricted());
        assert!(!TelegramCommand::Help.is_restricted());
    }

    #[test]
    fn help_lists_every_menu_command() {
        let help = command_help();
        for (cmd, desc) in bot_commands() {
            assert!(help.contains(&format!("/{cmd}")), "missing /{cmd}");
            assert!(!desc.is_empty());
        }
    }
}
