//! Feed HTTP client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::feed::HttpFeedConfig;

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// `[http]` section.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout for a feed fetch.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl From<HttpConfig> for HttpFeedConfig {
    fn from(config: HttpConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.timeout_ms),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        }
    }
}
