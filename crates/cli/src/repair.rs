use crate::args::RepairArgs;
use crate::config;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use folio_migration::Migrator;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub async fn run(
    _args: &RepairArgs,
    database_url: Option<&str>,
    migrations_dir: &Path,
) -> Result<(), CliError> {
    let database_url = config::database_url(database_url)?;
    let migrations = config::load_migrations(migrations_dir)?;
    let store = Arc::new(config::connect(&database_url).await?);

    let result = Migrator::new(store.clone(), migrations, None).repair().await;
    store.close().await;
    let repaired = result?;

    info!(repaired = repaired.len(), "repair finished");

    let ui = Ui::new(Style::detect());
    output::lines(ui.header("Repairing checksums"));
    if repaired.is_empty() {
        output::line(ui.ok_line("Every recorded checksum matches its script"));
    }
    for version in &repaired {
        output::line(ui.ok_line(&format!("{version} checksum updated")));
    }
    output::line(ui.kv("repaired", &repaired.len().to_string()));
    output::line(ui.rule());

    Ok(())
}
