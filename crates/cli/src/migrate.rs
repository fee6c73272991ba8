use crate::args::MigrateArgs;
use crate::config;
use crate::error::CliError;
use crate::output;
use crate::style::Style;
use crate::ui::Ui;
use folio_db::SqlxRecordStore;
use folio_migration::{Migration, Migrator, RecordStore};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(
    args: &MigrateArgs,
    database_url: Option<&str>,
    migrations_dir: &Path,
) -> Result<(), CliError> {
    let database_url = config::database_url(database_url)?;
    let migrations = config::load_migrations(migrations_dir)?;
    let store = Arc::new(config::connect(&database_url).await?);
    let ui = Ui::new(Style::detect());

    if args.dry_run {
        let result = dry_run(store.clone(), migrations, ui).await;
        store.close().await;
        return result;
    }

    // Sized to the whole set so no progress line is ever dropped.
    let (tx, mut rx) = mpsc::channel(migrations.len().max(1));
    let printer = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            output::line(ui.progress_line(&notification));
        }
    });

    output::lines(ui.header("Applying migrations"));

    let migrator = Migrator::new(store.clone(), migrations, Some(tx));
    let result = migrator.migrate().await;
    drop(migrator);
    if let Err(e) = printer.await {
        warn!(error = %e, "progress printer stopped early");
    }
    store.close().await;

    let report = result?;
    info!(
        applied = report.applied.len(),
        skipped = report.skipped,
        "migrate finished"
    );

    if report.applied.is_empty() {
        output::line(ui.ok_line("Database is up to date"));
    }
    output::line(ui.kv("applied", &report.applied.len().to_string()));
    output::line(ui.kv("already applied", &report.skipped.to_string()));
    output::line(ui.rule());

    Ok(())
}

async fn dry_run(
    store: Arc<SqlxRecordStore>,
    migrations: Vec<Migration>,
    ui: Ui,
) -> Result<(), CliError> {
    store.create().await?;

    let migrator = Migrator::new(store, migrations, None);
    migrator.validate().await?;
    let planned = migrator.plan().await?;

    output::lines(ui.header("Dry run"));
    if planned.is_empty() {
        output::line(ui.ok_line("Nothing to apply"));
    }
    for m in &planned {
        output::line(ui.info_line(&format!("{} {}", m.version, m.description)));
    }
    output::line(ui.kv("would apply", &planned.len().to_string()));
    output::line(ui.rule());

    Ok(())
}
