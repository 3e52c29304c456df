//! Rendered notification content.

use serde::Serialize;

use super::Channel;

/// Everything a sender needs to render one notification.
///
/// Produced by the formatter; every field degrades to an empty string
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPayload {
    pub feed_label: String,
    pub timestamp: String,
    pub flag: String,
    pub country: String,
    pub category: String,
    pub masked_subject: String,
    pub code: String,
    pub body: String,
    /// `body` with line breaks collapsed, for single-line destinations.
    pub flat_body: String,
}

impl DisplayPayload {
    /// Body variant appropriate for `channel`.
    #[must_use]
    pub fn body_for(&self, channel: &Channel) -> &str {
        if channel.flat_text {
            &self.flat_body
        } else {
            &self.body
        }
    }
}
