//! Entry point wiring CLI dispatch to the book club pipeline.

use anyhow::Result;
use bookclub::{cli::Cli, config::Settings, logging};
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, backend = ?settings.backend.kind, "starting command");
    cli.dispatch(settings).await
}
