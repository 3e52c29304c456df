//! Seen-set storage and cold-start configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::ColdStartPolicy;

const SECS_PER_HOUR: u64 = 3600;

/// Seen-set backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Durable SQLite file at `Config::database`.
    #[default]
    Sqlite,
    /// Process-local map; every restart is a cold start.
    Memory,
}

impl StoreBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

const fn default_retention_hours() -> u64 {
    168
}

const fn default_prune_interval_secs() -> u64 {
    3600
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Hours a mark is kept. 0 keeps marks forever.
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u64,
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
}

impl StoreConfig {
    /// Retention window, or `None` when pruning is disabled.
    #[must_use]
    pub fn retention(&self) -> Option<Duration> {
        (self.retention_hours > 0)
            .then(|| Duration::from_secs(self.retention_hours.saturating_mul(SECS_PER_HOUR)))
    }

    #[must_use]
    pub const fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            retention_hours: default_retention_hours(),
            prune_interval_secs: default_prune_interval_secs(),
        }
    }
}

/// `[cold_start]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct ColdStartConfig {
    /// Announce the newest record of each feed on the first successful poll.
    #[serde(default)]
    pub replay_latest: bool,
}

impl From<ColdStartConfig> for ColdStartPolicy {
    fn from(config: ColdStartConfig) -> Self {
        Self {
            replay_latest: config.replay_latest,
        }
    }
}
