use folio_migration::StoreError;
use sqlx::{Any, AnyPool, Transaction};

pub async fn begin<'a>(pool: &'a AnyPool, operation: &str) -> Result<Transaction<'a, Any>, StoreError> {
    pool.begin()
        .await
        .map_err(|e| StoreError::new(operation, format!("transaction begin failed: {e}")))
}

pub async fn commit(tx: Transaction<'_, Any>, operation: &str) -> Result<(), StoreError> {
    tx.commit()
        .await
        .map_err(|e| StoreError::new(operation, format!("transaction commit failed: {e}")))
}

/// Rolls back after `original` and returns the error to report. A failed
/// rollback is folded into the message rather than replacing it.
pub async fn rollback(tx: Transaction<'_, Any>, original: StoreError) -> StoreError {
    match tx.rollback().await {
        Ok(()) => original,
        Err(e) => StoreError::new(
            original.operation.clone(),
            format!("{}; rollback failed: {e}", original.message),
        ),
    }
}
