//! In-memory seen-set store.
//!
//! Loses every mark on restart. Suitable for tests and ephemeral runs where
//! cold-start reconciliation alone is enough to avoid replays.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{RecordKey, SeenMark};
use crate::error::StoreError;
use crate::port::SeenStore;

#[derive(Debug, Default)]
pub struct MemorySeenStore {
    marks: RwLock<HashMap<RecordKey, SeenMark>>,
}

impl MemorySeenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeenStore for MemorySeenStore {
    async fn insert(&self, key: &RecordKey, mark: SeenMark) -> Result<(), StoreError> {
        self.marks.write().entry(key.clone()).or_insert(mark);
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<SeenMark>, StoreError> {
        Ok(self.marks.read().get(key).copied())
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut marks = self.marks.write();
        let before = marks.len();
        marks.retain(|_, mark| mark.marked_at >= cutoff);
        Ok(before - marks.len())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.marks.read().len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarkKind;
    use chrono::Duration;

    #[tokio::test]
    async fn first_mark_wins() {
        let store = MemorySeenStore::new();
        let key = RecordKey::new("923001234567", "10:00");

        store
            .insert(&key, SeenMark::now(MarkKind::Reconciled))
            .await
            .unwrap();
        store
            .insert(&key, SeenMark::now(MarkKind::Announced))
            .await
            .unwrap();

        let mark = store.get(&key).await.unwrap().unwrap();
        assert_eq!(mark.kind, MarkKind::Reconciled);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn prune_removes_only_old_marks() {
        let store = MemorySeenStore::new();
        let old = RecordKey::new("1", "old");
        let fresh = RecordKey::new("1", "fresh");
        store
            .insert(
                &old,
                SeenMark {
                    kind: MarkKind::Announced,
                    marked_at: Utc::now() - Duration::days(10),
                },
            )
            .await
            .unwrap();
        store
            .insert(&fresh, SeenMark::now(MarkKind::Announced))
            .await
            .unwrap();

        let removed = store
            .prune_before(Utc::now() - Duration::days(7))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(store.get(&old).await.unwrap().is_none());
        assert!(store.get(&fresh).await.unwrap().is_some());
    }
}
