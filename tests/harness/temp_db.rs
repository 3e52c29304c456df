use std::path::{Path, PathBuf};

use otprelay::adapter::outbound::sqlite::SqliteSeenStore;
use otprelay::infrastructure::bootstrap::database_url;
use tempfile::TempDir;

/// Temporary SQLite database file for integration tests.
///
/// The file outlives every store opened on it, so reopening simulates a
/// process restart.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("otprelay-{name}.db"));
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        database_url(&self.path.to_string_lossy())
    }

    /// Open a fresh store on the database, running migrations.
    pub fn open(&self) -> SqliteSeenStore {
        SqliteSeenStore::open(&self.url()).expect("open sqlite store")
    }
}
