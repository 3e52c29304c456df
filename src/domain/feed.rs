//! Configured feeds and output channels.

use serde::{Deserialize, Serialize};

/// Default name of the JSON field holding the feed's rows.
pub const DEFAULT_RECORDS_FIELD: &str = "aaData";

fn default_records_field() -> String {
    DEFAULT_RECORDS_FIELD.to_string()
}

/// An HTTP source of records. Immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Short human-readable label shown in notifications and logs.
    pub label: String,
    /// URL fetched with a plain GET.
    pub url: String,
    /// Top-level JSON field that holds the array of rows.
    #[serde(default = "default_records_field")]
    pub records_field: String,
}

impl Feed {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            records_field: default_records_field(),
        }
    }
}

/// A destination that receives notifications.
///
/// `id` is opaque to the pipeline; the sender adapter decides how to
/// interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    /// Collapse line breaks in the message body for this destination.
    #[serde(default)]
    pub flat_text: bool,
}

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            flat_text: false,
        }
    }

    #[must_use]
    pub fn flat(mut self) -> Self {
        self.flat_text = true;
        self
    }
}
