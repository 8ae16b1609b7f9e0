//! HTTP route handlers for Axum.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::types::{BooksDto, HealthDto},
    catalog::{query::GENRES, BookRecord, SearchQuery, MAX_SUBJECTS},
    generate::GenerationResult,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

const MAX_LIMIT: u32 = 100;

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        service: "bookclub".to_string(),
        status: "running".to_string(),
        backend: state.club.generator().backend().name().to_string(),
        cached: state.club.cache().len(),
    })
}

pub async fn list_genres() -> Json<Vec<&'static str>> {
    Json(GENRES.to_vec())
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<BooksDto> {
    if query.limit == 0 || query.limit > MAX_LIMIT {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("limit must be between 1 and {MAX_LIMIT}"),
        ));
    }
    let results = state.club.search_and_discuss(&query).await;
    Ok(Json(BooksDto {
        query: query.to_query_string(),
        count: results.len(),
        results,
    }))
}

pub async fn discuss_book(
    State(state): State<AppState>,
    Json(mut book): Json<BookRecord>,
) -> ApiResult<GenerationResult> {
    if book.title.trim().is_empty() || book.authors.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "title and at least one author are required".to_string(),
        ));
    }
    book.subjects.truncate(MAX_SUBJECTS);
    let generated = state.club.discuss(&book).await;
    Ok(Json(GenerationResult::clone(&generated)))
}
