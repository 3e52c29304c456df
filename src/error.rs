use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Feed-level failures. Both variants skip the feed for the current cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed {feed} unreachable: {reason}")]
    Unreachable { feed: String, reason: String },

    #[error("feed {feed} returned a malformed payload: {reason}")]
    Malformed { feed: String, reason: String },
}

/// A single feed row that could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("row {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

/// Delivery failure for one channel. Never affects other channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("delivery to {channel} failed: {reason}")]
    Failed { channel: String, reason: String },

    #[error("delivery to {channel} timed out after {after_ms}ms")]
    TimedOut { channel: String, after_ms: u64 },
}

impl DeliveryError {
    /// Channel identifier the failed delivery was addressed to.
    #[must_use]
    pub fn channel(&self) -> &str {
        match self {
            Self::Failed { channel, .. } | Self::TimedOut { channel, .. } => channel,
        }
    }
}

/// The seen-set store could not be read or written.
///
/// Aborts the current poll cycle; the scheduler retries on the next tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("seen-set store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
