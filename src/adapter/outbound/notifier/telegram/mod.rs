//! Telegram delivery and command handling.
//!
//! Provides the [`TelegramSender`] used by the dispatcher and the inbound
//! command listener serving `/id` and `/chk`.
//!
//! Requires the `telegram` feature to be enabled.

mod auth;
mod command;
mod format;

pub mod control;
pub mod listener;
pub mod sender;

pub use control::TelegramControl;
pub use listener::run_command_listener;
pub use sender::TelegramSender;
