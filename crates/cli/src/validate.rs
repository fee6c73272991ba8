use crate::args::ValidateArgs;
use crate::config;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use folio_migration::Migrator;
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    _args: &ValidateArgs,
    database_url: Option<&str>,
    migrations_dir: &Path,
) -> Result<(), CliError> {
    let database_url = config::database_url(database_url)?;
    let migrations = config::load_migrations(migrations_dir)?;
    let count = migrations.len();
    let store = Arc::new(config::connect(&database_url).await?);

    let result = Migrator::new(store.clone(), migrations, None).validate().await;
    store.close().await;
    result?;

    let ui = Ui::new(Style::detect());
    output::line(ui.ok_line(&format!(
        "{count} migrations are consistent with the database"
    )));

    Ok(())
}
