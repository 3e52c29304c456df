//! Channel sender adapters.
//!
//! Implements the `port::ChannelSender` trait for the Telegram Bot API and
//! for a log-only sender used by dry runs.

pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogSender;
