//! Summary and discussion-question generation over a pluggable backend.

pub mod backend;
pub mod parse;
pub mod prompt;
pub mod template;

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{catalog::BookRecord, config::Settings, error::GenerationError};

pub use backend::{Backend, GenerationOptions};
pub use template::FallbackTemplates;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
const SUMMARY_MAX_TOKENS: u32 = 220;
const QUESTIONS_MAX_TOKENS: u32 = 350;

/// Where a piece of generated content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Backend,
    Template,
    Empty,
}

/// Summary and questions for one book, cached per [`crate::cache::CacheKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub summary: String,
    pub questions: Vec<String>,
    pub summary_origin: Origin,
    pub questions_origin: Origin,
    pub generated_at: DateTime<Utc>,
}

/// Turns book records into prompts and prompts into cleaned text.
#[derive(Debug, Clone)]
pub struct Generator {
    http: Client,
    backend: Backend,
    temperature: f32,
}

impl Generator {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_backend(
            Backend::from(&settings.backend),
            settings.backend.temperature,
            settings.backend.timeout,
        )
    }

    pub fn with_backend(backend: Backend, temperature: f32, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("bookclub/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            backend,
            temperature,
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub async fn try_generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.backend.generate(&self.http, prompt, options).await
    }

    pub async fn try_summarize(&self, book: &BookRecord) -> Result<String, GenerationError> {
        let prompt = prompt::summary_prompt(book);
        let options = GenerationOptions::new(SUMMARY_MAX_TOKENS, self.temperature);
        self.try_generate(&prompt, &options).await
    }

    pub async fn try_discussion_questions(
        &self,
        book: &BookRecord,
        k: usize,
    ) -> Result<Vec<String>, GenerationError> {
        let prompt = prompt::questions_prompt(book, k);
        let options = GenerationOptions::new(QUESTIONS_MAX_TOKENS, self.temperature);
        let raw = self.try_generate(&prompt, &options).await?;
        Ok(parse::parse_questions(&raw, k))
    }

    /// Short summary of `book`; empty when the backend produced nothing.
    pub async fn summarize(&self, book: &BookRecord) -> String {
        self.try_summarize(book)
            .await
            .unwrap_or_else(|err| self.degrade(err, "summary", &book.title))
    }

    /// At most `k` distinct discussion questions; empty on any failure.
    pub async fn discussion_questions(&self, book: &BookRecord, k: usize) -> Vec<String> {
        self.try_discussion_questions(book, k)
            .await
            .unwrap_or_else(|err| self.degrade(err, "questions", &book.title))
    }

    fn degrade<T: Default>(&self, err: GenerationError, what: &str, title: &str) -> T {
        match err {
            GenerationError::Disabled => debug!(what, %title, "generation disabled"),
            err => warn!(%err, backend = self.backend.name(), what, %title, "generation failed"),
        }
        T::default()
    }
}
