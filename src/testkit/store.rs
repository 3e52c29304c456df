//! Shareable seen-set for pipeline tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::adapter::outbound::memory::MemorySeenStore;
use crate::domain::{RecordKey, SeenMark};
use crate::error::StoreError;
use crate::port::SeenStore;

/// In-memory seen-set whose clones share state.
///
/// Box one clone into the pipeline and keep another for assertions. Every
/// call fails with [`StoreError::Unavailable`] while the store is switched
/// off; only `insert` fails while writes are switched off.
#[derive(Clone, Default)]
pub struct TestStore {
    inner: Arc<MemorySeenStore>,
    unavailable: Arc<AtomicBool>,
    writes_failing: Arc<AtomicBool>,
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_writes_failing(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    pub fn boxed(&self) -> Box<dyn SeenStore> {
        Box::new(self.clone())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk I/O error".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SeenStore for TestStore {
    async fn insert(&self, key: &RecordKey, mark: SeenMark) -> Result<(), StoreError> {
        self.check()?;
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("database is locked".to_string()));
        }
        self.inner.insert(key, mark).await
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<SeenMark>, StoreError> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        self.check()?;
        self.inner.prune_before(cutoff).await
    }

    async fn len(&self) -> Result<usize, StoreError> {
        self.check()?;
        self.inner.len().await
    }

    fn backend(&self) -> &'static str {
        "test"
    }
}
