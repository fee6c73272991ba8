mod common;

use common::MemoryStore;
use core::time::Duration;
use folio_migration::{Migration, MigrationError, MigrationRecord, Migrator, Status, Version};
use std::sync::Arc;
use tokio::sync::mpsc;

fn abc() -> Vec<Migration> {
    vec![
        Migration::new(1.0, "table a", "create table a"),
        Migration::new(2.0, "table b", "create table b"),
        Migration::new(3.0, "table c", "create table c"),
    ]
}

fn applied(migration: &Migration) -> MigrationRecord {
    MigrationRecord::for_attempt(migration, Duration::from_millis(5), true)
}

fn v(version: f64) -> Version {
    Version::from_f64(version)
}

#[tokio::test]
async fn applies_everything_on_a_fresh_store() {
    let store = Arc::new(MemoryStore::new());
    let migrator = Migrator::new(store.clone(), abc(), None);

    let report = migrator.migrate().await.unwrap();
    assert_eq!(report.applied, vec![v(1.0), v(2.0), v(3.0)]);
    assert_eq!(report.skipped, 0);
    assert_eq!(store.create_calls(), 1);

    let records = store.records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.success));
    assert_eq!(records[0].checksum, abc()[0].checksum());
    assert_eq!(records[0].description, "table a");

    let statuses: Vec<Status> = migrator
        .info()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.status)
        .collect();
    assert_eq!(statuses, vec![Status::Applied, Status::Applied, Status::Applied]);
}

#[tokio::test]
async fn plans_only_past_the_recorded_tip() {
    let set = abc();
    let store = Arc::new(MemoryStore::with_records(vec![applied(&set[0])]));
    let migrator = Migrator::new(store.clone(), set, None);

    let planned: Vec<Version> = migrator
        .plan()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.version)
        .collect();
    assert_eq!(planned, vec![v(2.0), v(3.0)]);

    migrator.migrate().await.unwrap();
    assert_eq!(store.executed(), vec!["create table b", "create table c"]);
}

#[tokio::test]
async fn second_migrate_executes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let migrator = Migrator::new(store.clone(), abc(), None);

    migrator.migrate().await.unwrap();
    let report = migrator.migrate().await.unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(report.skipped, 3);
    assert_eq!(store.executed().len(), 3);
    assert_eq!(store.records().len(), 3);
}

#[tokio::test]
async fn info_marks_skipped_micro_version_as_ignored() {
    let set = vec![
        Migration::new(1.0, "one", "s1"),
        Migration::new(1.1, "one point one", "s11"),
        Migration::new(2.0, "two", "s2"),
        Migration::new(3.0, "three", "s3"),
    ];
    let store = MemoryStore::with_records(vec![applied(&set[0]), applied(&set[2])]);
    let migrator = Migrator::new(store, set, None);

    let statuses: Vec<Status> = migrator
        .info()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.status)
        .collect();
    assert_eq!(
        statuses,
        vec![Status::Applied, Status::Ignored, Status::Applied, Status::Pending]
    );
}

#[tokio::test]
async fn failed_script_is_recorded_and_stops_the_run() {
    let store = Arc::new(MemoryStore::new());
    store.fail_script("create table b");
    let migrator = Migrator::new(store.clone(), abc(), None);

    let err = migrator.migrate().await.unwrap_err();
    match &err {
        MigrationError::ExecutionFailed { version, source } => {
            assert_eq!(*version, v(2.0));
            assert_eq!(source.operation, "exec");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());

    assert_eq!(store.executed(), vec!["create table a"]);

    let records = store.records();
    assert_eq!(records.len(), 2);
    assert!(records[0].success);
    assert!(!records[1].success);
    assert_eq!(records[1].version, v(2.0));
    assert_eq!(records[1].execution_time, Duration::from_millis(2));

    let statuses: Vec<Status> = migrator
        .info()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.status)
        .collect();
    assert_eq!(statuses, vec![Status::Applied, Status::Error, Status::Pending]);
}

#[tokio::test]
async fn rerun_after_failure_does_not_retry_the_failed_version() {
    let store = Arc::new(MemoryStore::new());
    store.fail_script("create table b");
    let migrator = Migrator::new(store.clone(), abc(), None);

    assert!(migrator.migrate().await.is_err());
    let report = migrator.migrate().await.unwrap();

    assert_eq!(report.applied, vec![v(3.0)]);
    assert_eq!(store.executed(), vec!["create table a", "create table c"]);
}

#[tokio::test]
async fn record_write_failure_aborts_immediately() {
    let store = Arc::new(MemoryStore::new());
    store.fail_inserts();
    let migrator = Migrator::new(store.clone(), abc(), None);

    let err = migrator.migrate().await.unwrap_err();
    assert!(matches!(err, MigrationError::Store(ref e) if e.operation == "insert"));
    assert_eq!(store.executed(), vec!["create table a"]);
}

#[tokio::test]
async fn validation_errors_run_no_scripts() {
    let original = abc();
    let store = Arc::new(MemoryStore::with_records(vec![applied(&original[0])]));

    let mut edited = abc();
    edited[0].script = "create table a (id int)".to_string();
    let migrator = Migrator::new(store.clone(), edited, None);

    let err = migrator.migrate().await.unwrap_err();
    assert!(matches!(err, MigrationError::InvalidChecksum { version, .. } if version == v(1.0)));
    assert!(!err.is_retryable());
    assert!(store.executed().is_empty());
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn removed_migration_is_rejected() {
    let set = abc();
    let store = MemoryStore::with_records(vec![applied(&set[0]), applied(&set[1])]);
    let migrator = Migrator::new(store, set[1..].to_vec(), None);

    let err = migrator.validate().await.unwrap_err();
    assert_eq!(err, MigrationError::RemovedMigration { version: v(1.0) });
}

#[tokio::test]
async fn duplicate_versions_are_rejected_before_execution() {
    let store = Arc::new(MemoryStore::new());
    let set = vec![
        Migration::new(2.0, "b", "create table b"),
        Migration::new(1.0, "a", "create table a"),
        Migration::new(2.0, "b again", "create table b2"),
    ];
    let migrator = Migrator::new(store.clone(), set, None);

    let err = migrator.migrate().await.unwrap_err();
    assert_eq!(err, MigrationError::DuplicateVersion { version: v(2.0) });
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn store_read_failures_propagate() {
    let store = Arc::new(MemoryStore::new());
    store.fail_reads();
    let migrator = Migrator::new(store, abc(), None);

    assert!(matches!(migrator.plan().await, Err(MigrationError::Store(_))));
    assert!(matches!(migrator.info().await, Err(MigrationError::Store(_))));
    assert!(matches!(migrator.migrate().await, Err(MigrationError::Store(_))));
}

#[tokio::test]
async fn publishes_one_notification_per_attempt() {
    let store = Arc::new(MemoryStore::new());
    store.fail_script("create table c");
    let (tx, mut rx) = mpsc::channel(8);
    let migrator = Migrator::new(store, abc(), Some(tx));

    assert!(migrator.migrate().await.is_err());
    drop(migrator);

    let mut seen = Vec::new();
    while let Some(n) = rx.recv().await {
        seen.push((n.version, n.success));
    }
    assert_eq!(seen, vec![(v(1.0), true), (v(2.0), true), (v(3.0), false)]);
}

#[tokio::test]
async fn full_notification_channel_does_not_block() {
    let store = Arc::new(MemoryStore::new());
    let (tx, mut rx) = mpsc::channel(1);
    let migrator = Migrator::new(store.clone(), abc(), Some(tx));

    let report = migrator.migrate().await.unwrap();
    assert_eq!(report.applied.len(), 3);
    assert_eq!(store.records().len(), 3);

    let first = rx.recv().await.unwrap();
    assert_eq!(first.version, v(1.0));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn empty_set_is_a_no_op() {
    let store = Arc::new(MemoryStore::new());
    let migrator = Migrator::new(store.clone(), Vec::new(), None);

    let report = migrator.migrate().await.unwrap();
    assert!(report.applied.is_empty());
    assert!(migrator.info().await.unwrap().is_empty());
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn repair_rerecords_edited_checksums_without_executing() {
    let set = abc();
    let store = Arc::new(MemoryStore::with_records(set.iter().map(applied).collect()));

    let mut edited = abc();
    edited[1].script = "create table b (id int)".to_string();
    let migrator = Migrator::new(store.clone(), edited.clone(), None);

    let err = migrator.validate().await.unwrap_err();
    assert!(matches!(err, MigrationError::InvalidChecksum { version, .. } if version == v(2.0)));

    let repaired = migrator.repair().await.unwrap();
    assert_eq!(repaired, vec![v(2.0)]);
    assert!(store.executed().is_empty());

    migrator.validate().await.unwrap();
    let record = store
        .records()
        .into_iter()
        .find(|r| r.version == v(2.0))
        .unwrap();
    assert_eq!(record.checksum, edited[1].checksum());

    assert!(migrator.repair().await.unwrap().is_empty());
}

#[tokio::test]
async fn repair_still_rejects_removed_migrations() {
    let set = abc();
    let store = Arc::new(MemoryStore::with_records(vec![applied(&set[0]), applied(&set[2])]));
    let without_c = set[..2].to_vec();

    let err = Migrator::new(store.clone(), without_c, None)
        .repair()
        .await
        .unwrap_err();
    assert!(matches!(err, MigrationError::RemovedMigration { version } if version == v(3.0)));
}
