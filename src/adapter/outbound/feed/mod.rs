//! HTTP feed transport.

pub mod client;

pub use client::{HttpFeedConfig, HttpRecordSource};
