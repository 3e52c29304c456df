//! `otprelay store` handlers: seen-set statistics and retention.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::{SeenStats, SqliteSeenStore};
use crate::application::DedupEngine;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::store::StoreBackend;
use crate::infrastructure::config::Config;

/// Print key counts and mark ages for the configured database.
pub fn execute_stats<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path.as_ref())?;
    if config.store.backend == StoreBackend::Memory {
        output::warning("In-memory store configured; nothing is persisted");
        return Ok(());
    }

    let store = SqliteSeenStore::open(&bootstrap::database_url(&config.database))?;
    let stats = store.stats()?;
    print_stats(&config.database, &stats);
    Ok(())
}

/// Delete marks older than the configured retention window.
pub async fn execute_prune<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path.as_ref())?;
    if config.store.backend == StoreBackend::Memory {
        output::warning("In-memory store configured; nothing to prune");
        return Ok(());
    }
    let Some(retention) = config.store.retention() else {
        output::note("Retention disabled (store.retention_hours = 0); nothing pruned");
        return Ok(());
    };

    let mut dedup = DedupEngine::new(bootstrap::build_store(&config)?);
    let removed = dedup.prune(retention).await?;
    let remaining = dedup.seen_count().await?;

    if output::is_json() {
        output::json_output(json!({
            "type": "store_prune",
            "payload": {
                "database": config.database,
                "retention_hours": config.store.retention_hours,
                "removed": removed,
                "remaining": remaining,
            },
        }));
        return Ok(());
    }

    output::section("Store Prune");
    output::field("Database", &config.database);
    output::field("Retention", format!("{}h", config.store.retention_hours));
    output::field("Remaining", remaining);
    output::success(&format!("Removed {removed} mark(s)"));
    Ok(())
}

fn print_stats(database: &str, stats: &SeenStats) {
    if output::is_json() {
        output::json_output(stats_json(database, stats));
        return;
    }

    output::section("Seen-set");
    output::field("Database", database);
    output::field("Keys", stats.total);
    output::field("Announced", stats.announced);
    output::field("Reconciled", stats.reconciled);
    match (stats.oldest, stats.newest) {
        (Some(oldest), Some(newest)) => {
            output::field("Oldest", oldest.to_rfc3339());
            output::field("Newest", newest.to_rfc3339());
        }
        _ => output::note("No records marked yet"),
    }
}

fn stats_json(database: &str, stats: &SeenStats) -> serde_json::Value {
    json!({
        "type": "store_stats",
        "payload": {
            "database": database,
            "total": stats.total,
            "announced": stats.announced,
            "reconciled": stats.reconciled,
            "oldest": stats.oldest.map(|at| at.to_rfc3339()),
            "newest": stats.newest.map(|at| at.to_rfc3339()),
        },
    })
}
