//! Command-line interface wiring for bookclub.

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::{catalog::BookRecord, config::Settings};

pub mod genres;
pub mod questions;
pub mod search;
pub mod serve;
pub mod summarize;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Book club companion: search books, get summaries and discussion questions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Search(args) => search::run(args, settings).await,
            Commands::Summarize(args) => summarize::run(args, settings).await,
            Commands::Questions(args) => questions::run(args, settings).await,
            Commands::Genres => genres::run(),
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the catalog and discuss every result.
    Search(search::Args),
    /// Generate a summary for one book.
    Summarize(summarize::Args),
    /// Generate discussion questions for one book.
    Questions(questions::Args),
    /// List the genres accepted by `search --genre`.
    Genres,
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// A book described on the command line rather than found by search.
#[derive(Debug, Clone, ClapArgs)]
pub struct BookArgs {
    /// Book title.
    #[arg(long)]
    pub title: String,
    /// Comma separated author names.
    #[arg(long, value_delimiter = ',')]
    pub author: Vec<String>,
    /// Comma separated subjects.
    #[arg(long, value_delimiter = ',')]
    pub subject: Vec<String>,
}

impl BookArgs {
    pub fn into_record(self) -> BookRecord {
        let authors = self
            .author
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        BookRecord::new(self.title.trim(), authors).with_subjects(self.subject)
    }
}
