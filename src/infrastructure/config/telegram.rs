//! Telegram delivery and command configuration.

use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

const fn default_true() -> bool {
    true
}

const fn default_send_timeout_secs() -> u64 {
    15
}

/// Telegram configuration.
///
/// The bot token is never read from the file; see [`TELEGRAM_TOKEN_ENV`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TelegramAppConfig {
    /// Deliver notifications through Telegram. When false, notifications are
    /// only logged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Run the inbound command listener (`/id`, `/chk`).
    #[serde(default = "default_true")]
    pub commands: bool,
    /// Upper bound on a single channel send.
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
    /// Chats allowed to run `/chk`. Empty allows every chat.
    #[serde(default)]
    pub admin_chats: Vec<i64>,
}

impl TelegramAppConfig {
    #[must_use]
    pub const fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            commands: default_true(),
            send_timeout_secs: default_send_timeout_secs(),
            admin_chats: Vec::new(),
        }
    }
}
