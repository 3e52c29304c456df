//! Notification formatting.
//!
//! Pure transforms from a [`Record`] to a [`DisplayPayload`]. Nothing here
//! fails: missing or odd input degrades to empty fields.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{country, DisplayPayload, Feed, Record};

/// Replaces the middle digits of a masked number.
pub const REDACTION_MARKER: &str = "XXXX";

/// Numbers shorter than this are shown unmasked.
const MASK_MIN_LEN: usize = 7;
const MASK_KEEP_HEAD: usize = 5;
const MASK_KEEP_TAIL: usize = 2;

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Joined 3-4 digit groups, then a bare digit run.
        Regex::new(r"\b\d{3,4}[- \t]\d{3,4}\b|\b\d{4,8}\b")
            .unwrap_or_else(|e| unreachable!("code pattern is valid: {e}"))
    })
}

/// Dash-joined pairs with a 2-digit half, such as `45-67`.
fn short_dash_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b\d{2,4}-\d{2,4}\b")
            .unwrap_or_else(|e| unreachable!("short dash pattern is valid: {e}"))
    })
}

/// Build the payload for `record` as announced from `feed`.
#[must_use]
pub fn format_record(record: &Record, feed: &Feed) -> DisplayPayload {
    let country = country::lookup(&record.country_tag);
    DisplayPayload {
        feed_label: feed.label.clone(),
        timestamp: record.timestamp.trim().to_string(),
        flag: country.flag.to_string(),
        country: country.name.to_string(),
        category: record.category.trim().to_string(),
        masked_subject: mask_number(record.subject_id.trim()),
        code: extract_code(&record.body),
        body: record.body.trim().to_string(),
        flat_body: flatten(&record.body),
    }
}

/// First code-looking digit group in `body`, or an empty string.
///
/// Short dash pairs like `45-67` only count when nothing longer appears
/// anywhere in the body, so dates such as `18-10` never shadow a real code.
#[must_use]
pub fn extract_code(body: &str) -> String {
    code_pattern()
        .find(body)
        .or_else(|| short_dash_pattern().find(body))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Keep the first five and last two characters, redacting the rest.
///
/// Values shorter than seven characters are returned unchanged.
#[must_use]
pub fn mask_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() < MASK_MIN_LEN {
        return number.to_string();
    }

    let head: String = chars[..MASK_KEEP_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_KEEP_TAIL..].iter().collect();
    format!("{head}{REDACTION_MARKER}{tail}")
}

/// Collapse line breaks (and the whitespace around them) into single spaces.
#[must_use]
pub fn flatten(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
