use core::time::Duration;
use folio_migration::{BoxFuture, MigrationRecord, RecordStore, StoreError, Version};
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory record store. Scripts registered with `fail_script` fail and
/// leave nothing behind, the way a rolled back transaction would.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    created: usize,
    records: Vec<MigrationRecord>,
    executed: Vec<String>,
    failing_scripts: HashSet<String>,
    fail_inserts: bool,
    fail_reads: bool,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MigrationRecord>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().records = records;
        store
    }

    pub fn fail_script(&self, script: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_scripts
            .insert(script.to_string());
    }

    pub fn fail_inserts(&self) {
        self.state.lock().unwrap().fail_inserts = true;
    }

    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }

    pub fn records(&self) -> Vec<MigrationRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().created
    }
}

impl RecordStore for MemoryStore {
    fn create<'a>(&'a self) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.state.lock().unwrap().created += 1;
            Ok(())
        })
    }

    fn insert<'a>(&'a self, record: &'a MigrationRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            if state.fail_inserts {
                return Err(StoreError::new("insert", "disk full"));
            }
            state.records.push(record.clone());
            Ok(())
        })
    }

    fn all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<MigrationRecord>, StoreError>> {
        Box::pin(async move {
            let state = self.state.lock().unwrap();
            if state.fail_reads {
                return Err(StoreError::new("all", "connection reset"));
            }
            // Newest first, so callers cannot rely on store order.
            Ok(state.records.iter().rev().cloned().collect())
        })
    }

    fn update_checksum<'a>(
        &'a self,
        version: Version,
        checksum: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            match state.records.iter_mut().find(|r| r.version == version) {
                Some(record) => {
                    record.checksum = checksum.to_string();
                    Ok(())
                }
                None => Err(StoreError::new(
                    "update_checksum",
                    format!("no record for version {version}"),
                )),
            }
        })
    }

    fn exec<'a>(&'a self, script: &'a str) -> BoxFuture<'a, (Duration, Result<(), StoreError>)> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            if state.failing_scripts.contains(script) {
                return (
                    Duration::from_millis(2),
                    Err(StoreError::new("exec", format!("syntax error in '{script}'"))),
                );
            }
            state.executed.push(script.to_string());
            (Duration::from_millis(1), Ok(()))
        })
    }
}
