//! Feed records and their deduplication identity.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry returned by a feed.
///
/// All fields are carried verbatim from the feed. `timestamp` is a display
/// string and is never parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String,
    pub country_tag: String,
    pub subject_id: String,
    pub category: String,
    pub body: String,
}

impl Record {
    /// The identity used to decide whether this record was already announced.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.subject_id.clone(), self.timestamp.clone())
    }
}

/// Deduplication identity of a [`Record`]: `(subject_id, timestamp)`.
///
/// Kept as a pair so that no separator can make two distinct keys collide.
/// Records with equal keys are the same logical event even when their
/// bodies differ between polls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    subject_id: String,
    timestamp: String,
}

impl RecordKey {
    pub fn new(subject_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.subject_id, self.timestamp)
    }
}

/// Why a key entered the seen-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    /// Observed during cold-start reconciliation; never dispatched.
    Reconciled,
    /// Dispatch was attempted.
    Announced,
}

impl MarkKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reconciled => "reconciled",
            Self::Announced => "announced",
        }
    }

    /// Parse the stored representation. Unknown values map to `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reconciled" => Some(Self::Reconciled),
            "announced" => Some(Self::Announced),
            _ => None,
        }
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seen-set entry: how and when a key was marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeenMark {
    pub kind: MarkKind,
    pub marked_at: DateTime<Utc>,
}

impl SeenMark {
    #[must_use]
    pub fn now(kind: MarkKind) -> Self {
        Self {
            kind,
            marked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject_id: &str, timestamp: &str, body: &str) -> Record {
        Record {
            timestamp: timestamp.into(),
            country_tag: "Pakistan".into(),
            subject_id: subject_id.into(),
            category: "WhatsApp".into(),
            body: body.into(),
        }
    }

    #[test]
    fn key_ignores_body_drift() {
        let first = record("923001234567", "2026-10-18 10:00:01", "code 1234");
        let second = record("923001234567", "2026-10-18 10:00:01", "code  1234\n");

        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn key_pair_does_not_collide_on_concatenation() {
        // "a_b" + "c" and "a" + "b_c" would collide if joined with '_'.
        let left = RecordKey::new("a_b", "c");
        let right = RecordKey::new("a", "b_c");

        assert_ne!(left, right);
    }

    #[test]
    fn mark_kind_round_trips_through_storage_text() {
        for kind in [MarkKind::Reconciled, MarkKind::Announced] {
            assert_eq!(MarkKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MarkKind::parse("pending"), None);
    }
}
