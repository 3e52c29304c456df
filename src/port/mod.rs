//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                  ┌──────────────────────┐
//!                  │  Poll pipeline       │
//!                  │  (application)       │
//!                  └──────────┬───────────┘
//!          ┌──────────────────┼──────────────────┐
//!          ▼                  ▼                  ▼
//!    ┌───────────┐     ┌─────────────┐    ┌─────────────┐
//!    │  Record   │     │  Seen-set   │    │  Channel    │
//!    │  Source   │     │  Store      │    │  Sender     │
//!    └───────────┘     └─────────────┘    └─────────────┘
//! ```

pub mod outbound;

pub use outbound::sender::ChannelSender;
pub use outbound::source::RecordSource;
pub use outbound::store::SeenStore;
