//! Seen-set persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{RecordKey, SeenMark};
use crate::error::StoreError;

/// Durable set of record keys that were already reconciled or announced.
///
/// # Access discipline
///
/// The seen-set has exactly one writer: the dedup engine owned by the poll
/// task. Implementations need not serialize concurrent `insert` calls for
/// the same key beyond keeping the first mark.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Mark `key`. Keeps the existing mark if the key is already present.
    async fn insert(&self, key: &RecordKey, mark: SeenMark) -> Result<(), StoreError>;

    /// Mark stored for `key`, or `None` if the key was never seen.
    async fn get(&self, key: &RecordKey) -> Result<Option<SeenMark>, StoreError>;

    /// Delete every mark older than `cutoff`. Returns the number removed.
    async fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;

    /// Number of stored keys.
    async fn len(&self) -> Result<usize, StoreError>;

    /// Backend name for logging.
    fn backend(&self) -> &'static str;
}
