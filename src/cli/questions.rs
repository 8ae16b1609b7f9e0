//! CLI entry-point for discussion questions about a single book.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{cli::BookArgs, config::Settings, generate::Generator, render};

/// Args for the `questions` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[command(flatten)]
    pub book: BookArgs,
    /// Number of questions; defaults to QUESTION_COUNT.
    #[arg(long)]
    pub count: Option<usize>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let generator = Generator::new(&settings)?;
    let k = args.count.unwrap_or(settings.question_count);
    let book = args.book.into_record();
    let questions = generator.discussion_questions(&book, k).await;
    info!(requested = k, produced = questions.len(), "generated questions");
    print!("{}", render::render_questions(&questions));
    Ok(())
}
