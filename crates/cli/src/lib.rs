pub mod args;
pub mod config;
pub mod error;
pub mod error_view;
pub mod info;
pub mod logging;
pub mod migrate;
pub mod output;
pub mod repair;
pub mod style;
pub mod ui;
pub mod validate;

pub use args::{Cli, Command, InfoArgs, MigrateArgs, RepairArgs, ValidateArgs};
pub use error::{CliError, ExitCode};
