//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Telegram bot token comes from
//! the `TELEGRAM_BOT_TOKEN` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use otprelay::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::http::HttpConfig;
use super::logging::LoggingConfig;
use super::store::{ColdStartConfig, StoreConfig};
use super::telegram::{TelegramAppConfig, TELEGRAM_TOKEN_ENV};
use crate::application::SchedulerConfig;
use crate::domain::{Channel, Feed};
use crate::error::{ConfigError, Result};

const fn default_interval_secs() -> u64 {
    4
}

fn default_database_path() -> String {
    "otprelay.db".to_string()
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seconds between poll cycle starts.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Log notifications instead of sending them.
    #[serde(default)]
    pub dry_run: bool,

    /// Path to the SQLite seen-set database.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feeds polled each cycle, in order.
    #[serde(default)]
    pub feeds: Vec<Feed>,

    /// Channels every new record is sent to, in order.
    #[serde(default)]
    pub channels: Vec<Channel>,

    #[serde(default)]
    pub cold_start: ColdStartConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Bot token, loaded from the environment after parsing.
    #[serde(skip)]
    pub telegram_token: Option<String>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.telegram_token = std::env::var(TELEGRAM_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be greater than 0"));
        }

        if self.feeds.is_empty() {
            return Err(ConfigError::MissingField { field: "feeds" }.into());
        }
        for feed in &self.feeds {
            if feed.label.trim().is_empty() {
                return Err(invalid("feeds.label", "must not be empty"));
            }
            validate_feed_url(&feed.url)?;
            if feed.records_field.trim().is_empty() {
                return Err(invalid(
                    "feeds.records_field",
                    format!("empty for feed `{}`", feed.label),
                ));
            }
        }

        if self.channels.is_empty() {
            return Err(ConfigError::MissingField { field: "channels" }.into());
        }
        let mut ids = HashSet::new();
        for channel in &self.channels {
            if channel.id.trim().is_empty() {
                return Err(invalid("channels.id", "must not be empty"));
            }
            if !ids.insert(channel.id.as_str()) {
                return Err(invalid(
                    "channels.id",
                    format!("duplicate channel `{}`", channel.id),
                ));
            }
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.store.retention_hours > 0 && self.store.prune_interval_secs == 0 {
            return Err(invalid("store.prune_interval_secs", "must be greater than 0"));
        }
        if self.http.timeout_ms == 0 {
            return Err(invalid("http.timeout_ms", "must be greater than 0"));
        }
        if self.http.connect_timeout_ms == 0 {
            return Err(invalid("http.connect_timeout_ms", "must be greater than 0"));
        }
        if self.telegram.send_timeout_secs == 0 {
            return Err(invalid("telegram.send_timeout_secs", "must be greater than 0"));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "must be `pretty` or `json`"));
        }

        Ok(())
    }

    /// Whether notifications go to Telegram rather than the log.
    #[must_use]
    pub fn delivers_to_telegram(&self) -> bool {
        self.telegram.enabled && !self.dry_run
    }

    /// Bot token, required when Telegram delivery or commands are active.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the token is not set.
    #[allow(clippy::result_large_err)]
    pub fn require_telegram_token(&self) -> Result<&str> {
        self.telegram_token.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: TELEGRAM_TOKEN_ENV,
            }
            .into()
        })
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Scheduler timing derived from the interval and `[store]` settings.
    #[must_use]
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: self.interval(),
            retention: self.store.retention(),
            prune_interval: self.store.prune_interval(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn validate_feed_url(raw: &str) -> Result<()> {
    let url = url::Url::parse(raw).map_err(|e| invalid("feeds.url", format!("`{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(
            "feeds.url",
            format!("`{raw}`: unsupported scheme `{other}`"),
        )),
    }
}
