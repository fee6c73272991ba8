use core::fmt::Debug;
use folio_migration::StoreError;

pub const TABLE_NAME: &str = "folio_migrations";

/// Backend-specific SQL used by the record store. No logic lives here.
///
/// All dialects store `applied_at`, `execution_time` and `success` as 64-bit
/// integers and `version` as a double so rows decode to the same Rust types
/// through `sqlx::Any`.
pub trait Dialect: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn create_table_sql(&self) -> &'static str;
    fn insert_sql(&self) -> &'static str;
    fn all_sql(&self) -> &'static str;
    /// Binds the new checksum first, then the version.
    fn update_checksum_sql(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

const SELECT_ALL: &str = "
SELECT version, description, checksum, applied_at, execution_time, success
FROM folio_migrations
ORDER BY version ASC
";

const UPDATE_CHECKSUM: &str = "
UPDATE folio_migrations
SET checksum = ?
WHERE version = ?
";

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn create_table_sql(&self) -> &'static str {
        "
CREATE TABLE IF NOT EXISTS folio_migrations (
    id             BIGSERIAL        PRIMARY KEY,
    version        DOUBLE PRECISION NOT NULL UNIQUE,
    description    VARCHAR(255)     NOT NULL,
    checksum       VARCHAR(64)      NOT NULL,
    applied_at     BIGINT           NOT NULL,
    execution_time BIGINT           NOT NULL,
    success        BIGINT           NOT NULL
)
"
    }

    fn insert_sql(&self) -> &'static str {
        "
INSERT INTO folio_migrations (
    version,
    description,
    checksum,
    applied_at,
    execution_time,
    success
)
VALUES ($1, $2, $3, $4, $5, $6)
"
    }

    fn all_sql(&self) -> &'static str {
        SELECT_ALL
    }
    fn update_checksum_sql(&self) -> &'static str {
        "
UPDATE folio_migrations
SET checksum = $1
WHERE version = $2
"
    }
}

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn create_table_sql(&self) -> &'static str {
        "
CREATE TABLE IF NOT EXISTS folio_migrations (
    id             BIGINT       AUTO_INCREMENT,
    version        DOUBLE       NOT NULL,
    description    VARCHAR(255) NOT NULL,
    checksum       VARCHAR(64)  NOT NULL,
    applied_at     BIGINT       NOT NULL,
    execution_time BIGINT       NOT NULL,
    success        BIGINT       NOT NULL,
    UNIQUE         (version),
    PRIMARY KEY    (id)
) ENGINE=InnoDB CHARACTER SET=utf8mb4
"
    }

    fn insert_sql(&self) -> &'static str {
        "
INSERT INTO folio_migrations (
    version,
    description,
    checksum,
    applied_at,
    execution_time,
    success
)
VALUES (?, ?, ?, ?, ?, ?)
"
    }

    fn all_sql(&self) -> &'static str {
        SELECT_ALL
    }
    fn update_checksum_sql(&self) -> &'static str {
        UPDATE_CHECKSUM
    }
}

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn create_table_sql(&self) -> &'static str {
        "
CREATE TABLE IF NOT EXISTS folio_migrations (
    id             INTEGER PRIMARY KEY,
    version        REAL    NOT NULL UNIQUE,
    description    TEXT    NOT NULL,
    checksum       TEXT    NOT NULL,
    applied_at     INTEGER NOT NULL,
    execution_time INTEGER NOT NULL,
    success        INTEGER NOT NULL
)
"
    }

    fn insert_sql(&self) -> &'static str {
        "
INSERT INTO folio_migrations (
    version,
    description,
    checksum,
    applied_at,
    execution_time,
    success
)
VALUES (?, ?, ?, ?, ?, ?)
"
    }

    fn all_sql(&self) -> &'static str {
        SELECT_ALL
    }
    fn update_checksum_sql(&self) -> &'static str {
        UPDATE_CHECKSUM
    }
}

/// Picks the dialect matching a connection URL's scheme.
pub fn dialect_for_url(url: &str) -> Result<Box<dyn Dialect>, StoreError> {
    let scheme = url.split(':').next().unwrap_or("").to_ascii_lowercase();

    match scheme.as_str() {
        "postgres" | "postgresql" => Ok(Box::new(Postgres)),
        "mysql" | "mariadb" => Ok(Box::new(MySql)),
        "sqlite" => Ok(Box::new(Sqlite)),
        _ => Err(StoreError::new(
            "connect",
            format!("unsupported database url scheme '{scheme}'"),
        )),
    }
}
