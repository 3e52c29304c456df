//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the command-line interface
//! - [`outbound`] - Driven side: feeds, seen-set stores, channel senders

pub mod inbound;
pub mod outbound;
