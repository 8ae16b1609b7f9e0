//! Search-then-discuss orchestration with per-session memoisation.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    cache::{CacheKey, CachePolicy, SessionCache},
    catalog::{BookRecord, CatalogClient, CoverSize, SearchQuery},
    config::Settings,
    generate::{FallbackTemplates, GenerationResult, Generator, Origin, DEFAULT_QUESTION_COUNT},
};

/// A search result paired with its generated discussion material.
#[derive(Debug, Clone, Serialize)]
pub struct BookDiscussion {
    #[serde(flatten)]
    pub book: BookRecord,
    pub cover_url: Option<String>,
    #[serde(flatten)]
    pub generated: GenerationResult,
}

#[derive(Debug)]
pub struct BookClub {
    catalog: CatalogClient,
    generator: Generator,
    cache: SessionCache,
    templates: Option<FallbackTemplates>,
    question_count: usize,
    fanout: usize,
}

impl BookClub {
    pub fn new(settings: &Settings) -> Result<Self> {
        let club = Self::from_parts(
            CatalogClient::new(settings)?,
            Generator::new(settings)?,
            SessionCache::new(CachePolicy::from_settings(settings)),
        )
        .with_question_count(settings.question_count)
        .with_fanout(settings.fanout);
        Ok(if settings.fallback_templates {
            club.with_templates(FallbackTemplates::new(settings.fallback_seed))
        } else {
            club
        })
    }

    pub fn from_parts(catalog: CatalogClient, generator: Generator, cache: SessionCache) -> Self {
        Self {
            catalog,
            generator,
            cache,
            templates: None,
            question_count: DEFAULT_QUESTION_COUNT,
            fanout: 1,
        }
    }

    pub fn with_templates(mut self, templates: FallbackTemplates) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_question_count(mut self, k: usize) -> Self {
        self.question_count = k;
        self
    }

    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = fanout.max(1);
        self
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub async fn search(&self, query: &SearchQuery) -> Vec<BookRecord> {
        self.catalog.search(query).await
    }

    /// Generated material for `book`, computed once per [`CacheKey`].
    pub async fn discuss(&self, book: &BookRecord) -> Arc<GenerationResult> {
        let key = CacheKey::for_book(book);
        if let Some(hit) = self.cache.get(&key) {
            debug!(%key, "generation cache hit");
            return hit;
        }
        debug!(%key, "generation cache miss");

        let summary = self.generator.summarize(book).await;
        let questions = self
            .generator
            .discussion_questions(book, self.question_count)
            .await;
        let result = self.assemble(book, &key, summary, questions);
        self.cache.insert(key, result)
    }

    /// Search, then discuss every hit. Result order follows the catalog.
    #[instrument(skip(self))]
    pub async fn search_and_discuss(&self, query: &SearchQuery) -> Vec<BookDiscussion> {
        let books = self.search(query).await;
        info!(count = books.len(), fanout = self.fanout, "discussing search results");
        let this = self;
        stream::iter(books)
            .map(move |book| async move {
                let generated = this.discuss(&book).await;
                BookDiscussion {
                    cover_url: this.catalog.cover_url(&book, CoverSize::default()),
                    generated: GenerationResult::clone(&generated),
                    book,
                }
            })
            .buffered(self.fanout)
            .collect()
            .await
    }

    fn assemble(
        &self,
        book: &BookRecord,
        key: &CacheKey,
        summary: String,
        questions: Vec<String>,
    ) -> GenerationResult {
        let (summary, summary_origin) = match (summary.is_empty(), &self.templates) {
            (false, _) => (summary, Origin::Backend),
            (true, Some(templates)) => (templates.summary(book, key.as_str()), Origin::Template),
            (true, None) => (summary, Origin::Empty),
        };
        let (questions, questions_origin) = match (questions.is_empty(), &self.templates) {
            (false, _) => (questions, Origin::Backend),
            (true, Some(templates)) => (
                templates.questions(book, self.question_count, key.as_str()),
                Origin::Template,
            ),
            (true, None) => (questions, Origin::Empty),
        };
        GenerationResult {
            summary,
            questions,
            summary_origin,
            questions_origin,
            generated_at: Utc::now(),
        }
    }
}
