//! Self-test path: format a synthetic record and dispatch it, bypassing
//! deduplication entirely.

use chrono::Utc;

use super::dispatch::{ChannelOutcome, DispatchReport, Dispatcher};
use super::format::format_record;
use crate::domain::{Feed, Record};

/// Label used for the synthetic feed.
pub const SELF_TEST_LABEL: &str = "Self-test";

/// Synthetic record used by the self-test.
#[must_use]
pub fn sample_record() -> Record {
    Record {
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        country_tag: "Pakistan-Test".to_string(),
        subject_id: "923001234567".to_string(),
        category: "Self-test".to_string(),
        body: "Your verification code is 123-456.\nDo not share it.".to_string(),
    }
}

/// Send the sample record to every channel and return the outcomes.
pub async fn run_self_test(dispatcher: &Dispatcher) -> DispatchReport {
    let feed = Feed::new(SELF_TEST_LABEL, "");
    let payload = format_record(&sample_record(), &feed);
    dispatcher.dispatch(&payload).await
}

/// Human-readable summary of a self-test run.
#[must_use]
pub fn summarize(report: &DispatchReport) -> String {
    if report.outcomes.is_empty() {
        return "🧪 Self-test: no channels configured".to_string();
    }

    let mut lines = vec![format!(
        "🧪 Self-test: delivered to {}/{} channels",
        report.delivered(),
        report.outcomes.len()
    )];
    for (channel, outcome) in &report.outcomes {
        match outcome {
            ChannelOutcome::Delivered => lines.push(format!("✅ {channel}")),
            ChannelOutcome::Failed(err) => lines.push(format!("❌ {channel}: {err}")),
        }
    }
    lines.join("\n")
}
