use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Versioned schema migrations with drift detection")]
pub struct Cli {
    /// Connection URL (postgres://, mysql://, sqlite:).
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory holding `<version>_<description>.sql` files.
    #[arg(long, env = "FOLIO_MIGRATIONS_DIR", default_value = "migrations", global = true)]
    pub migrations_dir: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply pending migrations.
    Migrate(MigrateArgs),
    /// Show the status of every migration.
    Info(InfoArgs),
    /// Check the migration set against the applied records.
    Validate(ValidateArgs),
    /// Re-record the checksums of intentionally edited migrations.
    Repair(RepairArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    /// Print the migrations that would run without executing them.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {}

#[derive(Parser, Debug, Clone)]
pub struct RepairArgs {}
