//! Book catalog search and result normalisation.

pub mod cover;
pub mod query;

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{config::Settings, error::CatalogError};

pub use cover::{cover_url, CoverSize};

/// Fields requested from the catalog; everything else is ignored.
const SEARCH_FIELDS: &str =
    "title,author_name,first_publish_year,subject,cover_i,ratings_average,ratings_count";

/// Subjects kept per record.
pub const MAX_SUBJECTS: usize = 5;

pub const DEFAULT_LIMIT: u32 = 5;

/// Normalised search result shared by the catalog and generation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub cover_id: Option<i64>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
}

impl BookRecord {
    /// Record with only the fields a prompt needs; used by the CLI and tests.
    pub fn new(title: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            year: None,
            subjects: Vec::new(),
            cover_id: None,
            rating: None,
            rating_count: None,
        }
    }

    pub fn with_subjects(mut self, subjects: Vec<String>) -> Self {
        self.subjects = subjects;
        self.subjects.truncate(MAX_SUBJECTS);
        self
    }

    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// User-facing search filters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            genre: None,
            author: None,
            title: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchQuery {
    pub fn to_query_string(&self) -> String {
        query::build_query(
            self.genre.as_deref(),
            self.author.as_deref(),
            self.title.as_deref(),
        )
    }
}

/// HTTP adapter over the book-search endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    search_url: String,
    covers_base: String,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_endpoint(
            &settings.catalog_search_url,
            &settings.covers_base_url,
            settings.catalog_timeout,
        )
    }

    pub fn with_endpoint(search_url: &str, covers_base: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("bookclub/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            http,
            search_url: search_url.to_string(),
            covers_base: covers_base.to_string(),
        })
    }

    /// Search the catalog. Any failure yields an empty list.
    pub async fn search(&self, query: &SearchQuery) -> Vec<BookRecord> {
        match self.try_search(query).await {
            Ok(books) => books,
            Err(err) => {
                warn!(%err, url = %self.search_url, "catalog search failed");
                Vec::new()
            }
        }
    }

    pub async fn try_search(&self, query: &SearchQuery) -> Result<Vec<BookRecord>, CatalogError> {
        let q = query.to_query_string();
        let limit = query.limit.to_string();
        let resp = self
            .http
            .get(&self.search_url)
            .query(&[
                ("q", q.as_str()),
                ("limit", limit.as_str()),
                ("has_fulltext", "true"),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        let body = resp.bytes().await?;
        let payload: SearchResponse = serde_json::from_slice(&body)?;
        let raw_count = payload.docs.len();
        let books: Vec<BookRecord> = payload
            .docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<RawDoc>(doc) {
                Ok(raw) => raw.into_record(),
                Err(err) => {
                    debug!(%err, "skipping undecodable catalog doc");
                    None
                }
            })
            .collect();
        info!(%q, raw = raw_count, kept = books.len(), "catalog search complete");
        Ok(books)
    }

    pub fn cover_url(&self, book: &BookRecord, size: CoverSize) -> Option<String> {
        cover::cover_url(&self.covers_base, book.cover_id, size)
    }
}

/// Docs stay untyped here so one odd doc cannot fail the whole response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawDoc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<Vec<String>>,
    #[serde(default)]
    first_publish_year: Option<i32>,
    #[serde(default)]
    subject: Option<Vec<String>>,
    #[serde(default)]
    cover_i: Option<i64>,
    #[serde(default)]
    ratings_average: Option<f64>,
    #[serde(default)]
    ratings_count: Option<u64>,
}

impl RawDoc {
    fn into_record(self) -> Option<BookRecord> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let authors = self.author_name.filter(|a| !a.is_empty())?;
        let mut subjects = self.subject.unwrap_or_default();
        subjects.truncate(MAX_SUBJECTS);
        Some(BookRecord {
            title,
            authors,
            year: self.first_publish_year,
            subjects,
            cover_id: self.cover_i,
            rating: self.ratings_average,
            rating_count: self.ratings_count,
        })
    }
}
