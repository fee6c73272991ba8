use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "folio=info,folio_cli=info,folio_migration=warn,folio_db=warn";
const VERBOSE_FILTER: &str = "folio=debug,folio_cli=debug,folio_migration=debug,folio_db=debug";

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
