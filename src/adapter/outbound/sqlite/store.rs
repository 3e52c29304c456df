//! SQLite seen-set store implementation.
//!
//! Provides durable storage for record keys using SQLite and Diesel ORM. The
//! key pair maps onto the table's composite primary key, so no separator is
//! involved.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::database::model::SeenRecordRow;
use crate::adapter::outbound::sqlite::database::schema::seen_records;
use crate::domain::{MarkKind, RecordKey, SeenMark};
use crate::error::{Result, StoreError};
use crate::port::SeenStore;

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Aggregate view of the seen-set, used by `store stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenStats {
    pub total: usize,
    pub announced: usize,
    pub reconciled: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

/// SQLite-backed seen-set.
///
/// Implements the [`SeenStore`] trait. Diesel calls are synchronous and short;
/// they run on the poll task like the rest of the seen-set access.
pub struct SqliteSeenStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteSeenStore {
    /// Create a store over an already migrated pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and apply
    /// pending migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    fn conn(&self) -> std::result::Result<Conn, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn to_row(key: &RecordKey, mark: SeenMark) -> SeenRecordRow {
        SeenRecordRow {
            subject_id: key.subject_id().to_string(),
            feed_timestamp: key.timestamp().to_string(),
            mark: mark.kind.as_str().to_string(),
            marked_at: timestamp_text(mark.marked_at),
        }
    }

    fn from_row(row: &SeenRecordRow) -> std::result::Result<SeenMark, StoreError> {
        let kind = MarkKind::parse(&row.mark)
            .ok_or_else(|| StoreError::Unavailable(format!("unknown mark `{}`", row.mark)))?;
        Ok(SeenMark {
            kind,
            marked_at: parse_timestamp(&row.marked_at)?,
        })
    }

    /// Counts per mark kind plus the oldest and newest mark times.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the database cannot be queried.
    pub fn stats(&self) -> std::result::Result<SeenStats, StoreError> {
        let mut conn = self.conn()?;

        let counts: Vec<(String, i64)> = seen_records::table
            .group_by(seen_records::mark)
            .select((seen_records::mark, diesel::dsl::count_star()))
            .load(&mut conn)
            .map_err(db_error)?;
        let oldest: Option<String> = seen_records::table
            .select(diesel::dsl::min(seen_records::marked_at))
            .first(&mut conn)
            .map_err(db_error)?;
        let newest: Option<String> = seen_records::table
            .select(diesel::dsl::max(seen_records::marked_at))
            .first(&mut conn)
            .map_err(db_error)?;

        let mut stats = SeenStats::default();
        for (mark, count) in counts {
            let count = usize::try_from(count).unwrap_or_default();
            stats.total += count;
            match MarkKind::parse(&mark) {
                Some(MarkKind::Announced) => stats.announced += count,
                Some(MarkKind::Reconciled) => stats.reconciled += count,
                None => {}
            }
        }
        stats.oldest = oldest.as_deref().map(parse_timestamp).transpose()?;
        stats.newest = newest.as_deref().map(parse_timestamp).transpose()?;
        Ok(stats)
    }
}

#[async_trait]
impl SeenStore for SqliteSeenStore {
    async fn insert(&self, key: &RecordKey, mark: SeenMark) -> std::result::Result<(), StoreError> {
        let row = Self::to_row(key, mark);
        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(seen_records::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db_error)?;

        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> std::result::Result<Option<SeenMark>, StoreError> {
        let mut conn = self.conn()?;

        let row: Option<SeenRecordRow> = seen_records::table
            .find((key.subject_id(), key.timestamp()))
            .select(SeenRecordRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>) -> std::result::Result<usize, StoreError> {
        let mut conn = self.conn()?;

        diesel::delete(seen_records::table.filter(seen_records::marked_at.lt(timestamp_text(cutoff))))
            .execute(&mut conn)
            .map_err(db_error)
    }

    async fn len(&self) -> std::result::Result<usize, StoreError> {
        let mut conn = self.conn()?;

        let count: i64 = seen_records::table
            .count()
            .get_result(&mut conn)
            .map_err(db_error)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

fn db_error(err: diesel::result::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn timestamp_text(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(text: &str) -> std::result::Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::Unavailable(format!("invalid mark time `{text}`: {e}")))
}
