pub mod checksum;
pub mod discovery;
pub mod error;
pub mod model;
pub mod ordering;
pub mod plan;
pub mod repair;
pub mod report;
pub mod runner;
pub mod store;
pub mod validate;
pub mod version;

pub use checksum::script_checksum;
pub use discovery::discover_migrations;
pub use error::{MigrationDiscoveryError, MigrationError, StoreError};
pub use model::{Info, Migration, MigrationRecord, Notification, Status};
pub use plan::plan;
pub use repair::drifted;
pub use report::info;
pub use runner::{MigrateReport, Migrator};
pub use store::{BoxFuture, RecordStore};
pub use validate::validate;
pub use version::{Version, VersionParseError};
