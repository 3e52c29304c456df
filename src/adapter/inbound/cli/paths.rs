//! Path utilities for otprelay.
//!
//! The default configuration lives at `~/.otprelay/config.toml`.

use std::path::PathBuf;

/// Returns the otprelay home directory (`~/.otprelay/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".otprelay")
}

/// Returns the default config file path (`~/.otprelay/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
