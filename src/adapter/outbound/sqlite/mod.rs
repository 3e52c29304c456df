//! SQLite persistence adapters.
//!
//! Provides the durable seen-set store using Diesel ORM.

pub mod database;
pub mod store;

pub use store::{SeenStats, SqliteSeenStore};
