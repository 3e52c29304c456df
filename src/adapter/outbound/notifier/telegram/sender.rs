//! Telegram channel sender.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::debug;

use crate::domain::{Channel, DisplayPayload};
use crate::error::DeliveryError;
use crate::port::ChannelSender;

use super::format::render_message;

/// Sends notifications through the Telegram Bot API.
///
/// The bot handle is cheap to clone and safe to share with the command
/// listener.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChannelSender for TelegramSender {
    async fn send(
        &self,
        channel: &Channel,
        payload: &DisplayPayload,
    ) -> Result<(), DeliveryError> {
        let recipient = recipient_for(&channel.id)?;
        let text = render_message(payload, channel);

        self.bot
            .send_message(recipient, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| DeliveryError::Failed {
                channel: channel.id.clone(),
                reason: e.to_string(),
            })?;

        debug!(channel = %channel.id, "Telegram message sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Map a channel identifier to a Telegram recipient.
///
/// Numeric ids (negative for groups and channels) become chat ids;
/// `@username` targets a public channel.
fn recipient_for(id: &str) -> Result<Recipient, DeliveryError> {
    if let Ok(chat_id) = id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(chat_id)));
    }
    if id.len() > 1 && id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(id.to_string()));
    }
    Err(DeliveryError::Failed {
        channel: id.to_string(),
        reason: "not a chat id or @channel username".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_chat_ids() {
        assert_eq!(
            recipient_for("-1001234567890").unwrap(),
            Recipient::Id(ChatId(-1_001_234_567_890))
        );
        assert_eq!(recipient_for("42").unwrap(), Recipient::Id(ChatId(42)));
    }

    #[test]
    fn usernames_become_channel_recipients() {
        assert_eq!(
            recipient_for("@otp_feed").unwrap(),
            Recipient::ChannelUsername("@otp_feed".into())
        );
    }

    #[test]
    fn invalid_ids_are_delivery_failures() {
        for id in ["", "@", "otp_feed", "12ab"] {
            let err = recipient_for(id).unwrap_err();
            assert_eq!(err.channel(), id);
        }
    }
}
