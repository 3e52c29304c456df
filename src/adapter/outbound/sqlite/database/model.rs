//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::seen_records;

/// Database row for a seen-set entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = seen_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SeenRecordRow {
    pub subject_id: String,
    pub feed_timestamp: String,
    pub mark: String,
    /// RFC 3339, UTC, millisecond precision; compared as text when pruning.
    pub marked_at: String,
}
