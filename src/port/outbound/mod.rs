//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the pipeline's infrastructure dependencies:
//! feed transport, seen-set persistence and channel delivery.

pub mod sender;
pub mod source;
pub mod store;
