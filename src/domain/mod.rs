//! Domain types shared by every layer: records, keys, feeds, channels,
//! notification payloads and the country table. No I/O lives here.

pub mod country;
pub mod feed;
pub mod payload;
pub mod record;

pub use country::Country;
pub use feed::{Channel, Feed, DEFAULT_RECORDS_FIELD};
pub use payload::DisplayPayload;
pub use record::{MarkKind, Record, RecordKey, SeenMark};
