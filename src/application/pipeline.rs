//! One poll cycle: fetch → parse → dedup → format → dispatch → mark.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::dedup::{DedupEngine, Verdict};
use super::dispatch::Dispatcher;
use super::format::format_record;
use super::parser::parse_feed;
use crate::domain::{Feed, Record, RecordKey};
use crate::error::StoreError;
use crate::port::RecordSource;

/// How the first successful poll of each feed is treated.
///
/// Every record a feed returns on its first successful poll in this process
/// is reconciled (marked seen without dispatch), so a restart never replays
/// the feed's backlog into live channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColdStartPolicy {
    /// Dispatch the first record in feed order during reconciliation, if it
    /// has never been marked.
    pub replay_latest: bool,
}

/// Counters for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub feeds_polled: usize,
    pub feeds_failed: usize,
    pub rows_skipped: usize,
    pub records_observed: usize,
    pub records_announced: usize,
    pub records_reconciled: usize,
    pub deliveries: usize,
    pub delivery_failures: usize,
}

/// The polling pipeline. Owns the dedup engine and therefore the seen-set.
pub struct Pipeline {
    feeds: Arc<[Feed]>,
    source: Arc<dyn RecordSource>,
    dedup: DedupEngine,
    dispatcher: Arc<Dispatcher>,
    cold_start: ColdStartPolicy,
    /// Indices of feeds that completed their cold-start reconciliation.
    reconciled: HashSet<usize>,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        feeds: Vec<Feed>,
        source: Arc<dyn RecordSource>,
        dedup: DedupEngine,
        dispatcher: Arc<Dispatcher>,
        cold_start: ColdStartPolicy,
    ) -> Self {
        Self {
            feeds: feeds.into(),
            source,
            dedup,
            dispatcher,
            cold_start,
            reconciled: HashSet::new(),
        }
    }

    #[must_use]
    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    /// Whether the feed at `index` finished cold-start reconciliation.
    #[must_use]
    pub fn is_reconciled(&self, index: usize) -> bool {
        self.reconciled.contains(&index)
    }

    #[must_use]
    pub fn dedup(&self) -> &DedupEngine {
        &self.dedup
    }

    /// Apply the seen-set retention window.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store rejects the delete.
    pub async fn prune(&mut self, retention: Duration) -> Result<usize, StoreError> {
        self.dedup.prune(retention).await
    }

    /// Run one cycle over every feed in configured order.
    ///
    /// Feed and channel failures are logged and counted; only a store failure
    /// aborts the cycle, leaving the rest of the cycle's records unmarked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the seen-set cannot be read or written.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, StoreError> {
        let feeds = Arc::clone(&self.feeds);
        let mut report = CycleReport::default();

        for (index, feed) in feeds.iter().enumerate() {
            let body = match self.source.fetch(feed).await {
                Ok(body) => body,
                Err(err) => {
                    warn!(feed = %feed.label, error = %err, "Skipping feed for this cycle");
                    report.feeds_failed += 1;
                    continue;
                }
            };
            let parsed = match parse_feed(feed, &body) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(feed = %feed.label, error = %err, "Skipping feed for this cycle");
                    report.feeds_failed += 1;
                    continue;
                }
            };

            report.feeds_polled += 1;
            report.rows_skipped += parsed.skipped.len();
            report.records_observed += parsed.records.len();
            for skipped in &parsed.skipped {
                debug!(feed = %feed.label, error = %skipped, "Skipping row");
            }

            if self.reconciled.contains(&index) {
                self.announce_new(feed, &parsed.records, &mut report).await?;
            } else {
                let before = report.records_reconciled;
                self.reconcile(feed, &parsed.records, &mut report).await?;
                self.reconciled.insert(index);
                info!(
                    feed = %feed.label,
                    reconciled = report.records_reconciled - before,
                    "Feed reconciled, backlog will not be replayed"
                );
            }
        }

        Ok(report)
    }

    async fn announce_new(
        &mut self,
        feed: &Feed,
        records: &[Record],
        report: &mut CycleReport,
    ) -> Result<(), StoreError> {
        for record in records {
            if let Verdict::New(key) = self.dedup.observe(record).await? {
                self.announce(feed, record, &key, report).await?;
            }
        }
        Ok(())
    }

    async fn reconcile(
        &mut self,
        feed: &Feed,
        records: &[Record],
        report: &mut CycleReport,
    ) -> Result<(), StoreError> {
        for (position, record) in records.iter().enumerate() {
            let Verdict::New(key) = self.dedup.observe(record).await? else {
                continue;
            };
            if position == 0 && self.cold_start.replay_latest {
                self.announce(feed, record, &key, report).await?;
            } else {
                self.dedup.mark_reconciled(&key).await?;
                report.records_reconciled += 1;
            }
        }
        Ok(())
    }

    /// Format, dispatch, then mark announced whatever the delivery outcome.
    async fn announce(
        &mut self,
        feed: &Feed,
        record: &Record,
        key: &RecordKey,
        report: &mut CycleReport,
    ) -> Result<(), StoreError> {
        let payload = format_record(record, feed);
        let dispatch = self.dispatcher.dispatch(&payload).await;

        report.records_announced += 1;
        report.deliveries += dispatch.delivered();
        report.delivery_failures += dispatch.failed();

        self.dedup.mark_announced(key).await?;
        info!(
            feed = %feed.label,
            number = %payload.masked_subject,
            service = %payload.category,
            delivered = dispatch.delivered(),
            failed = dispatch.failed(),
            "Record announced"
        );
        Ok(())
    }
}
