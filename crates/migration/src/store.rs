use crate::error::StoreError;
use crate::model::MigrationRecord;
use crate::version::Version;
use core::future::Future;
use core::pin::Pin;
use core::time::Duration;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence and script execution consumed by the migrator.
pub trait RecordStore: Send + Sync {
    /// Creates the bookkeeping structure if it does not exist yet.
    fn create<'a>(&'a self) -> BoxFuture<'a, Result<(), StoreError>>;

    fn insert<'a>(&'a self, record: &'a MigrationRecord) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Every record, in no particular order.
    fn all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<MigrationRecord>, StoreError>>;

    /// Rewrites the checksum recorded for `version`. Fails when no record
    /// exists for it.
    fn update_checksum<'a>(
        &'a self,
        version: Version,
        checksum: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Runs `script` as one atomic unit. The elapsed time is returned on
    /// failure too.
    fn exec<'a>(&'a self, script: &'a str) -> BoxFuture<'a, (Duration, Result<(), StoreError>)>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn create<'a>(&'a self) -> BoxFuture<'a, Result<(), StoreError>> {
        (**self).create()
    }

    fn insert<'a>(&'a self, record: &'a MigrationRecord) -> BoxFuture<'a, Result<(), StoreError>> {
        (**self).insert(record)
    }

    fn all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<MigrationRecord>, StoreError>> {
        (**self).all()
    }

    fn update_checksum<'a>(
        &'a self,
        version: Version,
        checksum: &'a str,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        (**self).update_checksum(version, checksum)
    }

    fn exec<'a>(&'a self, script: &'a str) -> BoxFuture<'a, (Duration, Result<(), StoreError>)> {
        (**self).exec(script)
    }
}
