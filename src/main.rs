use clap::Parser;
use folio_cli::ExitCode;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = folio_cli::Cli::parse();
    folio_cli::logging::init(cli.verbose);

    let database_url = cli.database_url.as_deref();
    let migrations_dir = cli.migrations_dir.as_path();

    let result = match &cli.command {
        folio_cli::Command::Migrate(args) => {
            folio_cli::migrate::run(args, database_url, migrations_dir).await
        }
        folio_cli::Command::Info(args) => {
            folio_cli::info::run(args, database_url, migrations_dir).await
        }
        folio_cli::Command::Validate(args) => {
            folio_cli::validate::run(args, database_url, migrations_dir).await
        }
        folio_cli::Command::Repair(args) => {
            folio_cli::repair::run(args, database_url, migrations_dir).await
        }
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            folio_cli::error_view::print(&err);
            err.code()
        }
    };
    std::process::exit(code.as_i32());
}
