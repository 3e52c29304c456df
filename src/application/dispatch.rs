//! Fan-out of one notification to every configured channel.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{Channel, DisplayPayload};
use crate::error::DeliveryError;
use crate::port::ChannelSender;

/// Result of delivering to one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    Delivered,
    Failed(DeliveryError),
}

/// Per-channel outcomes of one dispatch, in configured channel order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcomes: Vec<(String, ChannelOutcome)>,
}

impl DispatchReport {
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == ChannelOutcome::Delivered)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    /// Iterate over the failures.
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryError> {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            ChannelOutcome::Failed(err) => Some(err),
            ChannelOutcome::Delivered => None,
        })
    }
}

/// Sends payloads to a fixed list of channels.
///
/// Each channel is attempted independently and exactly once; a failure or
/// timeout on one channel never prevents delivery to the next. The
/// dispatcher holds no mutable state and is shared between the poll task and
/// the command listener.
pub struct Dispatcher {
    sender: Arc<dyn ChannelSender>,
    channels: Vec<Channel>,
    send_timeout: Duration,
}

impl Dispatcher {
    #[must_use]
    pub fn new(sender: Arc<dyn ChannelSender>, channels: Vec<Channel>, send_timeout: Duration) -> Self {
        Self {
            sender,
            channels,
            send_timeout,
        }
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    #[must_use]
    pub fn sender_name(&self) -> &'static str {
        self.sender.name()
    }

    /// Deliver `payload` to every channel in configured order.
    pub async fn dispatch(&self, payload: &DisplayPayload) -> DispatchReport {
        let mut report = DispatchReport::default();

        for channel in &self.channels {
            let outcome = match tokio::time::timeout(
                self.send_timeout,
                self.sender.send(channel, payload),
            )
            .await
            {
                Ok(Ok(())) => {
                    debug!(channel = %channel.id, sender = self.sender.name(), "Delivered");
                    ChannelOutcome::Delivered
                }
                Ok(Err(err)) => {
                    warn!(channel = %channel.id, error = %err, "Channel delivery failed");
                    ChannelOutcome::Failed(err)
                }
                Err(_) => {
                    let err = DeliveryError::TimedOut {
                        channel: channel.id.clone(),
                        after_ms: u64::try_from(self.send_timeout.as_millis()).unwrap_or(u64::MAX),
                    };
                    warn!(channel = %channel.id, error = %err, "Channel delivery timed out");
                    ChannelOutcome::Failed(err)
                }
            };
            report.outcomes.push((channel.id.clone(), outcome));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Fails for channel ids listed in `failing`, records every attempt.
    #[derive(Default)]
    struct ScriptedSender {
        failing: Vec<String>,
        hanging: Vec<String>,
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChannelSender for ScriptedSender {
        async fn send(
            &self,
            channel: &Channel,
            _payload: &DisplayPayload,
        ) -> Result<(), DeliveryError> {
            self.attempts.lock().push(channel.id.clone());
            if self.hanging.contains(&channel.id) {
                std::future::pending::<()>().await;
            }
            if self.failing.contains(&channel.id) {
                return Err(DeliveryError::Failed {
                    channel: channel.id.clone(),
                    reason: "chat not found".into(),
                });
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn payload() -> DisplayPayload {
        DisplayPayload {
            feed_label: "API 1".into(),
            timestamp: "10:00".into(),
            flag: "🌐".into(),
            country: "Unknown".into(),
            category: "Svc".into(),
            masked_subject: "12345XXXX67".into(),
            code: "1234".into(),
            body: "1234".into(),
            flat_body: "1234".into(),
        }
    }

    #[tokio::test]
    async fn failing_channel_does_not_block_the_next() {
        let sender = Arc::new(ScriptedSender {
            failing: vec!["a".into()],
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(
            sender.clone(),
            vec![Channel::new("a"), Channel::new("b")],
            Duration::from_secs(1),
        );

        let report = dispatcher.dispatch(&payload()).await;

        assert_eq!(*sender.attempts.lock(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().map(DeliveryError::channel), Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_channel_times_out() {
        let sender = Arc::new(ScriptedSender {
            hanging: vec!["slow".into()],
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(
            sender,
            vec![Channel::new("slow"), Channel::new("fast")],
            Duration::from_secs(15),
        );

        let report = dispatcher.dispatch(&payload()).await;

        assert!(matches!(
            report.outcomes[0].1,
            ChannelOutcome::Failed(DeliveryError::TimedOut { after_ms: 15_000, .. })
        ));
        assert_eq!(report.outcomes[1].1, ChannelOutcome::Delivered);
    }

    #[tokio::test]
    async fn no_channels_means_empty_report() {
        let dispatcher = Dispatcher::new(
            Arc::new(ScriptedSender::default()),
            Vec::new(),
            Duration::from_secs(1),
        );

        let report = dispatcher.dispatch(&payload()).await;

        assert!(report.outcomes.is_empty());
        assert_eq!(report.failed(), 0);
    }
}
