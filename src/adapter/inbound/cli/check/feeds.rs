//! `otprelay check feeds`: fetch and parse every feed once.
//!
//! Read-only: the seen-set is never opened, so nothing is marked.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::parser::parse_feed;
use crate::domain::Feed;
use crate::error::{Error, FeedError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::RecordSource;

const COLUMNS: [(&str, usize); 4] = [("Feed", 16), ("Records", 8), ("Skipped", 8), ("Newest", 22)];

/// Result of probing one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedProbe {
    pub label: String,
    pub outcome: std::result::Result<ProbeStats, FeedError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeStats {
    pub records: usize,
    pub skipped: usize,
    /// Timestamp of the first record in feed order.
    pub newest: Option<String>,
}

/// Fetch and parse `feed` through `source`.
pub async fn probe(source: &dyn RecordSource, feed: &Feed) -> FeedProbe {
    let outcome = match source.fetch(feed).await {
        Ok(body) => parse_feed(feed, &body).map(|parsed| ProbeStats {
            records: parsed.records.len(),
            skipped: parsed.skipped.len(),
            newest: parsed
                .records
                .first()
                .map(|record| record.timestamp.clone()),
        }),
        Err(err) => Err(err),
    };

    FeedProbe {
        label: feed.label.clone(),
        outcome,
    }
}

/// Probe every configured feed and print a table of results.
pub async fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path.as_ref())?;
    let source = bootstrap::build_source(&config);

    let mut probes = Vec::with_capacity(config.feeds.len());
    for feed in &config.feeds {
        probes.push(probe(source.as_ref(), feed).await);
    }

    report(&probes);

    match probes.into_iter().find_map(|probe| probe.outcome.err()) {
        Some(err) => Err(Error::Feed(err)),
        None => Ok(()),
    }
}

fn report(probes: &[FeedProbe]) {
    if output::is_json() {
        let feeds: Vec<_> = probes.iter().map(probe_json).collect();
        output::json_output(json!({
            "type": "check_feeds",
            "payload": { "feeds": feeds },
        }));
        return;
    }

    output::section("Feed Check");
    output::table_header(&COLUMNS);
    let widths: Vec<usize> = COLUMNS.iter().map(|(_, width)| *width).collect();
    output::table_separator(&widths);

    for probe in probes {
        match &probe.outcome {
            Ok(stats) => output::table_row(
                &[
                    probe.label.clone(),
                    stats.records.to_string(),
                    stats.skipped.to_string(),
                    stats.newest.clone().unwrap_or_else(|| "-".to_string()),
                ],
                &widths,
            ),
            Err(err) => output::error(&err.to_string()),
        }
    }

    let failed = probes.iter().filter(|probe| probe.outcome.is_err()).count();
    if failed == 0 {
        output::success(&format!("{} feed(s) reachable", probes.len()));
    } else {
        output::warning(&format!("{failed} of {} feed(s) failed", probes.len()));
    }
}

fn probe_json(probe: &FeedProbe) -> serde_json::Value {
    match &probe.outcome {
        Ok(stats) => json!({
            "label": probe.label,
            "ok": true,
            "records": stats.records,
            "skipped": stats.skipped,
            "newest": stats.newest,
        }),
        Err(err) => json!({
            "label": probe.label,
            "ok": false,
            "error": err.to_string(),
        }),
    }
}
