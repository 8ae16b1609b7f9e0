//! CLI entry-point for summarising a single book.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{cli::BookArgs, config::Settings, generate::Generator, render};

/// Args for the `summarize` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub book: BookArgs,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let generator = Generator::new(&settings)?;
    let book = args.book.into_record();
    let summary = generator.summarize(&book).await;
    info!(chars = summary.len(), "generated summary");
    println!("{}", render::render_summary(&summary));
    Ok(())
}
