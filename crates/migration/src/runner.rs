use crate::error::MigrationError;
use crate::model::{Info, Migration, MigrationRecord, Notification};
use crate::plan::plan;
use crate::repair::drifted;
use crate::report;
use crate::store::RecordStore;
use crate::validate::validate;
use crate::version::Version;
use core::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateReport {
    /// Versions applied by this call, in order.
    pub applied: Vec<Version>,
    /// Records that already existed when the call started.
    pub skipped: usize,
}

/// Applies a migration set against a record store.
///
/// Migrations run one at a time in ascending version order. Every attempt is
/// recorded, successful or not, and the first failed script stops the run.
pub struct Migrator<S> {
    store: S,
    migrations: Vec<Migration>,
    notifier: Option<Sender<Notification>>,
}

impl<S: RecordStore> Migrator<S> {
    pub fn new(
        store: S,
        migrations: Vec<Migration>,
        notifier: Option<Sender<Notification>>,
    ) -> Self {
        Self {
            store,
            migrations,
            notifier,
        }
    }

    pub async fn validate(&self) -> Result<(), MigrationError> {
        let records = self.store.all().await?;
        validate(&self.migrations, &records)
    }

    pub async fn plan(&self) -> Result<Vec<&Migration>, MigrationError> {
        let records = self.store.all().await?;
        Ok(plan(&self.migrations, &records))
    }

    pub async fn info(&self) -> Result<Vec<Info>, MigrationError> {
        let records = self.store.all().await?;
        report::info(&self.migrations, &records)
    }

    pub async fn migrate(&self) -> Result<MigrateReport, MigrationError> {
        self.store.create().await?;
        debug!("bookkeeping structure ready");

        let records = self.store.all().await?;
        validate(&self.migrations, &records)?;

        let planned = plan(&self.migrations, &records);
        debug!(
            planned = planned.len(),
            recorded = records.len(),
            "planned migrations"
        );

        let mut applied = Vec::with_capacity(planned.len());
        for migration in planned {
            self.apply(migration).await?;
            applied.push(migration.version);
        }

        Ok(MigrateReport {
            applied,
            skipped: records.len(),
        })
    }

    /// Re-records the live checksum of every edited migration. Nothing is
    /// executed; the other validation checks still apply.
    pub async fn repair(&self) -> Result<Vec<Version>, MigrationError> {
        let records = self.store.all().await?;
        let drifted = drifted(&self.migrations, &records)?;

        let mut repaired = Vec::with_capacity(drifted.len());
        for migration in drifted {
            let checksum = migration.checksum();
            self.store.update_checksum(migration.version, &checksum).await?;
            info!(version = %migration.version, %checksum, "checksum repaired");
            repaired.push(migration.version);
        }

        Ok(repaired)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), MigrationError> {
        let version = migration.version;
        debug!(%version, description = %migration.description, "executing migration");

        let (elapsed, result) = self.store.exec(&migration.script).await;
        let success = result.is_ok();

        self.notify(migration, success, elapsed);

        let record = MigrationRecord::for_attempt(migration, elapsed, success);
        self.store.insert(&record).await?;

        match result {
            Ok(()) => {
                info!(
                    %version,
                    description = %migration.description,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "migration applied"
                );
                Ok(())
            }
            Err(source) => {
                warn!(%version, error = %source, "migration failed");
                Err(MigrationError::ExecutionFailed { version, source })
            }
        }
    }

    fn notify(&self, migration: &Migration, success: bool, elapsed: Duration) {
        let Some(tx) = &self.notifier else {
            return;
        };

        let notification = Notification {
            version: migration.version,
            description: migration.description.clone(),
            success,
            execution_time: elapsed,
        };

        match tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                warn!(version = %n.version, "notification channel full; dropping notification");
            }
            Err(TrySendError::Closed(n)) => {
                warn!(version = %n.version, "notification channel closed; dropping notification");
            }
        }
    }
}
