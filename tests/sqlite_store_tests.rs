mod harness;

use chrono::{Duration, Utc};
use otprelay::application::DedupEngine;
use otprelay::domain::{MarkKind, RecordKey, SeenMark};
use otprelay::port::SeenStore;
use otprelay::testkit::domain;

#[tokio::test]
async fn marks_survive_reopening_the_database() {
    let db = harness::temp_db::TempDb::create("reopen");
    let key = RecordKey::new("923001234567", "2026-01-01 10:00:00");

    {
        let store = db.open();
        store
            .insert(&key, SeenMark::now(MarkKind::Announced))
            .await
            .unwrap();
    }

    let store = db.open();
    assert!(store.get(&key).await.unwrap().is_some());
    let mark = store.get(&key).await.unwrap().unwrap();
    assert_eq!(mark.kind, MarkKind::Announced);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn second_insert_keeps_the_first_mark() {
    let db = harness::temp_db::TempDb::create("first-mark");
    let store = db.open();
    let key = RecordKey::new("923001234567", "t0");

    store
        .insert(&key, SeenMark::now(MarkKind::Reconciled))
        .await
        .unwrap();
    store
        .insert(&key, SeenMark::now(MarkKind::Announced))
        .await
        .unwrap();

    assert_eq!(store.len().await.unwrap(), 1);
    assert_eq!(
        store.get(&key).await.unwrap().unwrap().kind,
        MarkKind::Reconciled
    );
}

#[tokio::test]
async fn keys_differing_only_in_timestamp_are_distinct() {
    let db = harness::temp_db::TempDb::create("distinct");
    let store = db.open();

    for ts in ["t0", "t1", "t2"] {
        store
            .insert(&RecordKey::new("923001234567", ts), SeenMark::now(MarkKind::Announced))
            .await
            .unwrap();
    }

    assert_eq!(store.len().await.unwrap(), 3);
    assert!(store
        .get(&RecordKey::new("923001234567", "t3"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn dedup_prune_drops_only_expired_marks() {
    let db = harness::temp_db::TempDb::create("prune");
    let store = db.open();
    let old = RecordKey::new("923001234567", "old");
    let fresh = RecordKey::new("923001234567", "fresh");
    store
        .insert(
            &old,
            SeenMark {
                kind: MarkKind::Reconciled,
                marked_at: Utc::now() - Duration::hours(200),
            },
        )
        .await
        .unwrap();
    store
        .insert(&fresh, SeenMark::now(MarkKind::Announced))
        .await
        .unwrap();

    let mut dedup = DedupEngine::new(Box::new(db.open()));
    let removed = dedup
        .prune(std::time::Duration::from_secs(168 * 3600))
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert!(store.get(&old).await.unwrap().is_none());
    assert!(store.get(&fresh).await.unwrap().is_some());
}

#[tokio::test]
async fn stats_count_marks_by_kind() {
    let db = harness::temp_db::TempDb::create("stats");
    let store = db.open();
    let dedup_store = db.open();
    let mut dedup = DedupEngine::new(Box::new(dedup_store));

    let records = domain::records(3);
    dedup.mark_reconciled(&records[1].key()).await.unwrap();
    dedup.mark_reconciled(&records[2].key()).await.unwrap();
    dedup.mark_announced(&records[0].key()).await.unwrap();

    let stats = store.stats().unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.announced, 1);
    assert_eq!(stats.reconciled, 2);
    assert!(stats.oldest.unwrap() <= stats.newest.unwrap());
}
