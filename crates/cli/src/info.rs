use crate::args::InfoArgs;
use crate::config;
use crate::error::{is_missing_bookkeeping, CliError};
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use folio_migration::{Info, Migration, RecordStore, Status};
use std::path::Path;
use tracing::debug;

pub async fn run(
    _args: &InfoArgs,
    database_url: Option<&str>,
    migrations_dir: &Path,
) -> Result<(), CliError> {
    let database_url = config::database_url(database_url)?;
    let migrations = config::load_migrations(migrations_dir)?;
    let store = config::connect(&database_url).await?;

    let result = statuses(&store, &migrations).await;
    store.close().await;
    let infos = result?;

    let ui = Ui::new(Style::detect());
    output::lines(ui.header("Migration status"));
    for info in &infos {
        output::line(ui.info_row(info));
    }
    output::line(ui.rule());
    output::lines(summary(&ui, &infos));

    Ok(())
}

/// Status of every migration. A database that has never been migrated has
/// no bookkeeping table yet and reads as having no records.
async fn statuses<S: RecordStore>(
    store: &S,
    migrations: &[Migration],
) -> Result<Vec<Info>, CliError> {
    let records = match store.all().await {
        Ok(records) => records,
        Err(err) if is_missing_bookkeeping(&err) => {
            debug!("no bookkeeping table; every migration is pending");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    Ok(folio_migration::info(migrations, &records)?)
}

fn summary(ui: &Ui, infos: &[Info]) -> Vec<String> {
    [Status::Applied, Status::Pending, Status::Ignored, Status::Error]
        .into_iter()
        .map(|status| {
            let count = infos.iter().filter(|i| i.status == status).count();
            ui.kv(&status.as_str().to_ascii_lowercase(), &count.to_string())
        })
        .collect()
}
