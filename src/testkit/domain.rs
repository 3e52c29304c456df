//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Record`]s, [`Feed`]s and raw
//! feed bodies so tests focus on assertions rather than construction
//! boilerplate.

use serde_json::{json, Value};

use crate::domain::{Feed, Record, DEFAULT_RECORDS_FIELD};

/// A record with fixed country and category.
pub fn record(subject_id: &str, timestamp: &str, body: &str) -> Record {
    Record {
        timestamp: timestamp.to_string(),
        country_tag: "Pakistan-PK".to_string(),
        subject_id: subject_id.to_string(),
        category: "WhatsApp".to_string(),
        body: body.to_string(),
    }
}

/// Generate `n` records for one subject, newest first, with timestamps
/// `t{n-1}` down to `t0`.
pub fn records(n: usize) -> Vec<Record> {
    (0..n)
        .rev()
        .map(|i| record("923001234567", &format!("t{i}"), &format!("code {}", 1000 + i)))
        .collect()
}

/// A feed named `label` with a URL that is never resolved.
pub fn feed(label: &str) -> Feed {
    Feed::new(label, format!("http://feeds.test/{label}"))
}

/// The five-element row a feed returns for `record`.
pub fn row(record: &Record) -> Value {
    json!([
        record.timestamp,
        record.country_tag,
        record.subject_id,
        record.category,
        record.body,
    ])
}

/// A feed response body holding `records` in order.
pub fn feed_body(records: &[Record]) -> String {
    rows_body(records.iter().map(row).collect())
}

/// A feed response body holding arbitrary rows.
pub fn rows_body(rows: Vec<Value>) -> String {
    json!({ DEFAULT_RECORDS_FIELD: rows }).to_string()
}
