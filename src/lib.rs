//! otprelay - poll OTP feeds and relay new records to Telegram channels.
//!
//! Every few seconds the relay fetches each configured feed, parses the
//! rows into records, drops the ones it has already seen and sends a
//! formatted notification for each new record to every channel.
//!
//! # Architecture
//!
//! - [`domain`] - Records, keys, seen marks, feeds, channels and payloads
//! - [`port`] - Traits at the edges: record source, seen-set, channel sender
//! - [`application`] - Parsing, deduplication, formatting, dispatch and the
//!   poll scheduler
//! - [`adapter`] - HTTP feeds, SQLite and in-memory seen-sets, Telegram and
//!   the CLI
//! - [`infrastructure`] - Configuration loading and the composition root
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and the bot command listener
//! - `testkit` - Scripted sources, recording senders and test stores

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
