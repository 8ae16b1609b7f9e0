//! Shared DTOs for JSON responses.

use serde::{Deserialize, Serialize};

use crate::club::BookDiscussion;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub service: String,
    pub status: String,
    pub backend: String,
    pub cached: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BooksDto {
    pub query: String,
    pub count: usize,
    pub results: Vec<BookDiscussion>,
}
