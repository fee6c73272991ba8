use crate::dialect::{dialect_for_url, Dialect};
use crate::transaction;
use chrono::{TimeZone, Utc};
use core::time::Duration;
use folio_migration::{BoxFuture, MigrationRecord, RecordStore, StoreError, Version};
use sqlx::any::{install_default_drivers, AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Executor, Row};
use std::time::Instant;
use tracing::debug;

/// Record store over any sqlx backend, shaped by a [`Dialect`].
pub struct SqlxRecordStore {
    pool: AnyPool,
    dialect: Box<dyn Dialect>,
}

impl SqlxRecordStore {
    pub fn new(pool: AnyPool, dialect: Box<dyn Dialect>) -> Self {
        Self { pool, dialect }
    }

    /// Connects with a single pooled connection; migrations never run in
    /// parallel, and it keeps `sqlite::memory:` databases alive.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let dialect = dialect_for_url(database_url)?;
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::new("connect", e.to_string()))?;

        debug!(dialect = dialect.name(), "connected to record store");
        Ok(Self::new(pool, dialect))
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Waits for the pooled connection to be returned and closes it.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn run_script(&self, operation: &str, script: &str) -> Result<(), StoreError> {
        let mut tx = transaction::begin(&self.pool, operation).await?;

        if let Err(e) = (&mut *tx).execute(sqlx::raw_sql(script)).await {
            let err = StoreError::new(operation, e.to_string());
            return Err(transaction::rollback(tx, err).await);
        }

        transaction::commit(tx, operation).await
    }

    async fn insert_record(&self, record: &MigrationRecord) -> Result<(), StoreError> {
        let mut tx = transaction::begin(&self.pool, "insert").await?;

        let query = sqlx::query(self.dialect.insert_sql())
            .bind(record.version.to_f64())
            .bind(record.description.clone())
            .bind(record.checksum.clone())
            .bind(record.applied_at.timestamp())
            .bind(duration_micros(record.execution_time))
            .bind(i64::from(record.success));
        let result = (&mut *tx).execute(query).await;

        if let Err(e) = result {
            let err = StoreError::new("insert", e.to_string());
            return Err(transaction::rollback(tx, err).await);
        }

        transaction::commit(tx, "insert").await
    }

    async fn select_all(&self) -> Result<Vec<MigrationRecord>, StoreError> {
        let rows = (&self.pool)
            .fetch_all(sqlx::query(self.dialect.all_sql()))
            .await
            .map_err(|e| StoreError::new("all", e.to_string()))?;

        rows.iter().map(decode_record).collect()
    }

    async fn rewrite_checksum(&self, version: Version, checksum: &str) -> Result<(), StoreError> {
        let mut tx = transaction::begin(&self.pool, "update_checksum").await?;

        let query = sqlx::query(self.dialect.update_checksum_sql())
            .bind(checksum.to_string())
            .bind(version.to_f64());

        let updated = match (&mut *tx).execute(query).await {
            Ok(done) => done.rows_affected(),
            Err(e) => {
                let err = StoreError::new("update_checksum", e.to_string());
                return Err(transaction::rollback(tx, err).await);
            }
        };

        if updated == 0 {
            let message = format!("no record for version {version}");
            let err = StoreError::new("update_checksum", message);
            return Err(transaction::rollback(tx, err).await);
        }

        transaction::commit(tx, "update_checksum").await
    }
}

impl RecordStore for SqlxRecordStore {
    fn create<'a>(&'a self) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.run_script("create", self.dialect.create_table_sql()))
    }

    fn insert<'a>(&'a self, record: &'a MigrationRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.insert_record(record))
    }

    fn all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<MigrationRecord>, StoreError>> {
        Box::pin(self.select_all())
    }

    fn update_checksum<'a>(
        &'a self,
        version: Version,
        checksum: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.rewrite_checksum(version, checksum))
    }

    fn exec<'a>(&'a self, script: &'a str) -> BoxFuture<'a, (Duration, Result<(), StoreError>)> {
        Box::pin(async move {
            let started = Instant::now();
            let result = self.run_script("exec", script).await;
            (started.elapsed(), result)
        })
    }
}

fn decode_record(row: &AnyRow) -> Result<MigrationRecord, StoreError> {
    let decode = |e: sqlx::Error| StoreError::new("all", format!("malformed record: {e}"));

    let version: f64 = row.try_get("version").map_err(decode)?;
    let description: String = row.try_get("description").map_err(decode)?;
    let checksum: String = row.try_get("checksum").map_err(decode)?;
    let applied_at: i64 = row.try_get("applied_at").map_err(decode)?;
    let execution_time: i64 = row.try_get("execution_time").map_err(decode)?;
    let success: i64 = row.try_get("success").map_err(decode)?;

    let applied_at = Utc.timestamp_opt(applied_at, 0).single().ok_or_else(|| {
        StoreError::new("all", format!("malformed record: invalid applied_at {applied_at}"))
    })?;

    Ok(MigrationRecord {
        version: Version::from_f64(version),
        description,
        checksum,
        applied_at,
        execution_time: Duration::from_micros(execution_time.max(0) as u64),
        success: success != 0,
    })
}

fn duration_micros(d: Duration) -> i64 {
    let us = d.as_micros();
    if us > i64::MAX as u128 {
        i64::MAX
    } else {
        us as i64
    }
}
