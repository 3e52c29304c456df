//! Application services (use cases).
//!
//! The poll pipeline and its parts: parsing, deduplication, formatting,
//! dispatch and the fixed-interval scheduler that drives them.

pub mod dedup;
pub mod dispatch;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod scheduler;
pub mod selftest;

pub use dedup::{DedupEngine, Verdict};
pub use dispatch::{ChannelOutcome, DispatchReport, Dispatcher};
pub use pipeline::{ColdStartPolicy, CycleReport, Pipeline};
pub use scheduler::{PollScheduler, SchedulerConfig, SchedulerHandle, SchedulerState, SchedulerStatus};
