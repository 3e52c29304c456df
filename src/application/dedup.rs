//! Deduplication engine.
//!
//! Decides whether a polled record is new by consulting the seen-set store.
//! The engine never marks on `observe`; callers mark a key only after they
//! have attempted dispatch (or reconciled it during cold start).
//!
//! # Single writer
//!
//! Marking and pruning take `&mut self` and the engine is not `Clone`, so the
//! seen-set can only be mutated by whoever owns the engine. In this crate
//! that is the [`Pipeline`](super::pipeline::Pipeline) owned by the poll
//! task. Fetching feeds in parallel must keep all marking on that task.

use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::domain::{MarkKind, Record, RecordKey, SeenMark};
use crate::error::StoreError;
use crate::port::SeenStore;

/// Outcome of observing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Key is not in the seen-set.
    New(RecordKey),
    /// Key was already reconciled or announced.
    Seen(MarkKind),
}

impl Verdict {
    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// NEW/SEEN decisions over an injected [`SeenStore`].
pub struct DedupEngine {
    store: Box<dyn SeenStore>,
}

impl DedupEngine {
    #[must_use]
    pub fn new(store: Box<dyn SeenStore>) -> Self {
        Self { store }
    }

    /// Decide whether `record` is new. Does not mark it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    pub async fn observe(&self, record: &Record) -> Result<Verdict, StoreError> {
        let key = record.key();
        match self.store.get(&key).await? {
            Some(mark) => {
                debug!(key = %key, kind = mark.kind.as_str(), "Record already seen");
                Ok(Verdict::Seen(mark.kind))
            }
            None => Ok(Verdict::New(key)),
        }
    }

    /// Record that dispatch of `key` was attempted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mark cannot be written.
    pub async fn mark_announced(&mut self, key: &RecordKey) -> Result<(), StoreError> {
        self.store
            .insert(key, SeenMark::now(MarkKind::Announced))
            .await
    }

    /// Record that `key` was part of the cold-start backlog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mark cannot be written.
    pub async fn mark_reconciled(&mut self, key: &RecordKey) -> Result<(), StoreError> {
        self.store
            .insert(key, SeenMark::now(MarkKind::Reconciled))
            .await
    }

    /// Drop marks older than `retention`. Returns the number removed.
    ///
    /// A window reaching past the earliest representable time removes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the delete.
    pub async fn prune(&mut self, retention: Duration) -> Result<usize, StoreError> {
        let retention = chrono::Duration::from_std(retention)
            .map_err(|e| StoreError::Unavailable(format!("invalid retention: {e}")))?;
        let Some(cutoff) = Utc::now().checked_sub_signed(retention) else {
            debug!("Retention window exceeds the calendar; nothing to prune");
            return Ok(0);
        };
        self.store.prune_before(cutoff).await
    }

    /// Number of keys currently in the seen-set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be queried.
    pub async fn seen_count(&self) -> Result<usize, StoreError> {
        self.store.len().await
    }

    /// Backend name of the underlying store.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::TestStore;

    fn record(subject_id: &str, timestamp: &str, body: &str) -> Record {
        Record {
            timestamp: timestamp.into(),
            country_tag: "India".into(),
            subject_id: subject_id.into(),
            category: "Telegram".into(),
            body: body.into(),
        }
    }

    #[tokio::test]
    async fn new_until_marked_then_seen_forever() {
        let mut engine = DedupEngine::new(TestStore::new().boxed());
        let rec = record("919876543210", "10:00:01", "code 4821");

        let verdict = engine.observe(&rec).await.unwrap();
        let Verdict::New(key) = verdict else {
            panic!("expected new record");
        };
        // Observing again without marking is still new.
        assert!(engine.observe(&rec).await.unwrap().is_new());

        engine.mark_announced(&key).await.unwrap();
        for _ in 0..5 {
            assert_eq!(
                engine.observe(&rec).await.unwrap(),
                Verdict::Seen(MarkKind::Announced)
            );
        }
    }

    #[tokio::test]
    async fn body_drift_does_not_make_a_record_new() {
        let mut engine = DedupEngine::new(TestStore::new().boxed());
        let first = record("919876543210", "10:00:01", "code 4821");
        let drifted = record("919876543210", "10:00:01", "code: 4821 (resent)");

        engine.mark_announced(&first.key()).await.unwrap();

        assert_eq!(
            engine.observe(&drifted).await.unwrap(),
            Verdict::Seen(MarkKind::Announced)
        );
    }

    #[tokio::test]
    async fn reconciled_keys_are_seen() {
        let mut engine = DedupEngine::new(TestStore::new().boxed());
        let rec = record("15551234567", "yesterday", "1234");

        engine.mark_reconciled(&rec.key()).await.unwrap();

        assert_eq!(
            engine.observe(&rec).await.unwrap(),
            Verdict::Seen(MarkKind::Reconciled)
        );
        assert_eq!(engine.seen_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn prune_keeps_recent_marks() {
        let mut engine = DedupEngine::new(TestStore::new().boxed());
        engine
            .mark_announced(&RecordKey::new("1", "t"))
            .await
            .unwrap();

        let removed = engine.prune(Duration::from_secs(3600)).await.unwrap();

        assert_eq!(removed, 0);
        assert_eq!(engine.seen_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn retention_beyond_the_calendar_prunes_nothing() {
        let mut engine = DedupEngine::new(TestStore::new().boxed());
        engine
            .mark_reconciled(&RecordKey::new("1", "t"))
            .await
            .unwrap();

        let removed = engine
            .prune(Duration::from_secs(10_000_000_000 * 3600))
            .await
            .unwrap();

        assert_eq!(removed, 0);
        assert_eq!(engine.seen_count().await.unwrap(), 1);
    }
}
