//! Log-only channel sender.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{Channel, DisplayPayload};
use crate::error::DeliveryError;
use crate::port::ChannelSender;

/// Writes each notification to the log instead of a chat.
///
/// Used for `--dry-run` and when Telegram is disabled. Always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl ChannelSender for LogSender {
    async fn send(
        &self,
        channel: &Channel,
        payload: &DisplayPayload,
    ) -> Result<(), DeliveryError> {
        info!(
            channel = %channel.id,
            feed = %payload.feed_label,
            country = %payload.country,
            category = %payload.category,
            subject = %payload.masked_subject,
            code = %payload.code,
            body = %payload.body_for(channel),
            "Dry-run delivery"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_sender_always_succeeds() {
        let payload = DisplayPayload {
            feed_label: "API 1".into(),
            timestamp: "2026-10-18 10:00:00".into(),
            flag: "🌐".into(),
            country: "Unknown".into(),
            category: "WhatsApp".into(),
            masked_subject: "92300XXXX67".into(),
            code: "123456".into(),
            body: "code 123456".into(),
            flat_body: "code 123456".into(),
        };

        let result = LogSender.send(&Channel::new("-100"), &payload).await;

        assert!(result.is_ok());
        assert_eq!(LogSender.name(), "log");
    }
}
