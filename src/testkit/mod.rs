//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: [`ScriptedSource`](source::ScriptedSource), a feed source
//!   replaying queued bodies and errors per feed.
//! - [`sender`]: Recording and failing [`ChannelSender`](crate::port::ChannelSender)s.
//! - [`store`]: [`TestStore`](store::TestStore), a shareable in-memory
//!   seen-set that can be switched to unavailable.
//! - [`domain`]: Builders for records, feeds and feed bodies.

pub mod domain;
pub mod sender;
pub mod source;
pub mod store;

pub use sender::{FailingSender, RecordingSender};
pub use source::ScriptedSource;
pub use store::TestStore;
