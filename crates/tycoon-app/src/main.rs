// Basketball Career Tycoon entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout stays clean for CLI output)
// 2. Parse the command line
// 3. Load config (copying defaults on first run)
// 4. Dispatch: serve the API, or run a one-off simulation

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tycoon_app::cli::{self, Cli};
use tycoon_core::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {}:{}, database {}",
        config.server.host, config.server.port, config.database.path
    );

    cli::run(cli, config).await
}

/// Initialize tracing to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tycoon=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
