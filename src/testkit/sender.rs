//! Channel senders that record what they were asked to deliver.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Channel, DisplayPayload};
use crate::error::DeliveryError;
use crate::port::ChannelSender;

/// Thread-safe delivery collector for dispatch assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<(String, DisplayPayload)>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(channel id, payload)` delivered so far, in order.
    pub fn sent(&self) -> Vec<(String, DisplayPayload)> {
        self.sent.lock().clone()
    }

    /// Payloads delivered to `channel`.
    pub fn sent_to(&self, channel: &str) -> Vec<DisplayPayload> {
        self.sent
            .lock()
            .iter()
            .filter(|(id, _)| id == channel)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ChannelSender for RecordingSender {
    async fn send(
        &self,
        channel: &Channel,
        payload: &DisplayPayload,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().push((channel.id.clone(), payload.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Fails for a fixed set of channels and records every attempt.
///
/// Successful deliveries are forwarded to an inner [`RecordingSender`].
#[derive(Clone, Default)]
pub struct FailingSender {
    failing: Arc<HashSet<String>>,
    attempts: Arc<Mutex<Vec<String>>>,
    delivered: RecordingSender,
}

impl FailingSender {
    pub fn for_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: Arc::new(channels.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Channel ids in the order sends were attempted.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }

    /// The deliveries that succeeded.
    pub fn delivered(&self) -> &RecordingSender {
        &self.delivered
    }
}

#[async_trait]
impl ChannelSender for FailingSender {
    async fn send(
        &self,
        channel: &Channel,
        payload: &DisplayPayload,
    ) -> Result<(), DeliveryError> {
        self.attempts.lock().push(channel.id.clone());
        if self.failing.contains(&channel.id) {
            return Err(DeliveryError::Failed {
                channel: channel.id.clone(),
                reason: "chat not found".to_string(),
            });
        }
        self.delivered.send(channel, payload).await
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
