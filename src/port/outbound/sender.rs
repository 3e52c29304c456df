//! Outbound channel port.

use async_trait::async_trait;

use crate::domain::{Channel, DisplayPayload};
use crate::error::DeliveryError;

/// Delivers a rendered notification to one channel.
///
/// Rendering to the transport's markup happens inside the sender, so the
/// pipeline only deals in [`DisplayPayload`]s.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Send `payload` to `channel`. One attempt, no retries.
    async fn send(&self, channel: &Channel, payload: &DisplayPayload)
        -> Result<(), DeliveryError>;

    /// Transport name for logging.
    fn name(&self) -> &'static str;
}
