pub mod dialect;
pub mod store;
pub mod transaction;

pub use dialect::{dialect_for_url, Dialect, MySql, Postgres, Sqlite};
pub use store::SqlxRecordStore;
