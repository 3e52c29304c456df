//! Feed response parsing.
//!
//! A feed body is a JSON object whose records field holds an array of rows,
//! each row an array `[timestamp, country_tag, subject_id, category, body]`.
//! Whole-feed structural problems fail the feed; row problems only skip the
//! row.

use serde_json::Value;

use crate::domain::{Feed, Record};
use crate::error::{FeedError, RecordError};

/// Minimum number of positional fields in a row.
pub const ROW_WIDTH: usize = 5;

/// Records parsed from one feed response, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub records: Vec<Record>,
    /// Rows that were skipped, with the reason.
    pub skipped: Vec<RecordError>,
}

/// Parse a raw response body from `feed`.
///
/// # Errors
///
/// Returns [`FeedError::Malformed`] when the body is not a JSON object or the
/// configured records field is missing or not an array.
pub fn parse_feed(feed: &Feed, body: &str) -> Result<ParsedFeed, FeedError> {
    let malformed = |reason: String| FeedError::Malformed {
        feed: feed.label.clone(),
        reason,
    };

    let value: Value =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    let Value::Object(mut object) = value else {
        return Err(malformed("top-level value is not an object".to_string()));
    };
    let rows = match object.remove(&feed.records_field) {
        Some(Value::Array(rows)) => rows,
        Some(_) => {
            return Err(malformed(format!(
                "field `{}` is not an array",
                feed.records_field
            )))
        }
        None => {
            return Err(malformed(format!(
                "missing field `{}`",
                feed.records_field
            )))
        }
    };

    let mut parsed = ParsedFeed::default();
    for (index, row) in rows.iter().enumerate() {
        match parse_row(index, row) {
            Ok(record) => parsed.records.push(record),
            Err(err) => parsed.skipped.push(err),
        }
    }
    Ok(parsed)
}

fn parse_row(index: usize, row: &Value) -> Result<Record, RecordError> {
    let malformed = |reason: String| RecordError::Malformed { index, reason };

    let Value::Array(cells) = row else {
        return Err(malformed("row is not an array".to_string()));
    };
    if cells.len() < ROW_WIDTH {
        return Err(malformed(format!(
            "expected at least {ROW_WIDTH} fields, found {}",
            cells.len()
        )));
    }

    let field = |position: usize, name: &str| {
        cell_text(&cells[position]).ok_or_else(|| malformed(format!("{name} is not text")))
    };

    let record = Record {
        timestamp: field(0, "timestamp")?,
        country_tag: field(1, "country")?,
        subject_id: field(2, "number")?,
        category: field(3, "service")?,
        body: field(4, "message")?,
    };

    if record.subject_id.trim().is_empty() {
        return Err(malformed("number is empty".to_string()));
    }
    if record.timestamp.trim().is_empty() {
        return Err(malformed("timestamp is empty".to_string()));
    }
    Ok(record)
}

/// Strings pass through; numbers keep their JSON spelling.
fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
