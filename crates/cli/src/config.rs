use crate::error::CliError;
use folio_db::SqlxRecordStore;
use folio_migration::{discover_migrations, Migration};
use std::path::Path;
use tracing::debug;

pub fn database_url(arg: Option<&str>) -> Result<String, CliError> {
    match arg.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CliError::user_error("DATABASE_URL is required")
            .with_action("Set DATABASE_URL or pass --database-url")),
    }
}

pub fn load_migrations(dir: &Path) -> Result<Vec<Migration>, CliError> {
    let migrations = discover_migrations(dir)?;
    debug!(count = migrations.len(), dir = %dir.display(), "discovered migrations");
    Ok(migrations)
}

pub async fn connect(database_url: &str) -> Result<SqlxRecordStore, CliError> {
    Ok(SqlxRecordStore::connect(database_url).await?)
}

#[cfg(test)]
mod tests {
    use super::{database_url, load_migrations};
    use crate::error::ExitCode;
    use std::fs;

    #[test]
    fn database_url_must_be_present_and_non_blank() {
        assert_eq!(
            database_url(Some(" sqlite::memory: ")).unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(database_url(None).unwrap_err().code(), ExitCode::UserError);
        assert!(database_url(Some("   ")).is_err());
    }

    #[test]
    fn discovery_errors_are_user_errors() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("oops.sql"), b"select 1;").unwrap();

        let err = load_migrations(tmp.path()).unwrap_err();
        assert_eq!(err.code(), ExitCode::UserError);
        assert!(err.reason().unwrap_or_default().contains("oops.sql"));
    }
}
