//! CLI entry-point for searching and discussing books.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{catalog::SearchQuery, club::BookClub, config::Settings, render};

/// Args for the `search` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Genre filter, e.g. "Science Fiction" (see `genres`).
    #[arg(long)]
    pub genre: Option<String>,
    /// Author filter.
    #[arg(long)]
    pub author: Option<String>,
    /// Title filter.
    #[arg(long)]
    pub title: Option<String>,
    /// Maximum number of results.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub limit: u32,
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let club = BookClub::new(&settings)?;
    let query = SearchQuery {
        genre: args.genre,
        author: args.author,
        title: args.title,
        limit: args.limit,
    };
    let results = club.search_and_discuss(&query).await;
    info!(count = results.len(), "search finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    if results.is_empty() {
        println!("No books found. Try broadening your search.");
        return Ok(());
    }
    println!("Found {} book(s)\n", results.len());
    for item in &results {
        println!("{}", render::render_discussion(item));
    }
    Ok(())
}
