mod common;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{routing::{get, post}, Json, Router};
use bookclub::{
    cache::{CachePolicy, SessionCache},
    catalog::{BookRecord, SearchQuery},
    club::BookClub,
    generate::{backend::LocalBackend, Backend, FallbackTemplates, Origin},
};
use serde_json::json;

async fn counting_backend() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let router = Router::new().route(
        "/api/generate",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "response": "1. Who is Paul?\n2. What is spice?" }))
            }
        }),
    );
    (format!("{}/api/generate", common::spawn(router).await), calls)
}

async fn catalog_with(titles: &[&str]) -> String {
    let docs: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "title": t, "author_name": ["Author"], "cover_i": i + 1 }))
        .collect();
    let body = json!({ "docs": docs });
    let router = Router::new().route(
        "/search.json",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    format!("{}/search.json", common::spawn(router).await)
}

fn club(catalog_url: &str, backend: Backend) -> BookClub {
    BookClub::from_parts(
        common::catalog(catalog_url),
        common::generator(backend),
        SessionCache::new(CachePolicy::unbounded()),
    )
}

fn local(endpoint: String) -> Backend {
    Backend::Local(LocalBackend {
        endpoint,
        model: "llama3".into(),
    })
}

fn dune(cover_id: Option<i64>) -> BookRecord {
    let mut book = BookRecord::new("Dune", vec!["Frank Herbert".into()]);
    book.year = Some(1965);
    book.cover_id = cover_id;
    book
}

#[tokio::test]
async fn identical_key_reuses_first_result() {
    let (backend_url, calls) = counting_backend().await;
    let club = club(&common::dead_url().await, local(backend_url));

    let first = club.discuss(&dune(Some(7))).await;
    let mut same_key = dune(Some(7));
    same_key.subjects = vec!["different subjects do not matter".into()];
    let second = club.discuss(&same_key).await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 2, "one summary + one questions call");
    assert_eq!(first.questions, vec!["Who is Paul?", "What is spice?"]);
    assert_eq!(first.summary_origin, Origin::Backend);
    assert_eq!(club.cache().len(), 1);
}

#[tokio::test]
async fn different_cover_is_a_different_entry() {
    let (backend_url, calls) = counting_backend().await;
    let club = club(&common::dead_url().await, local(backend_url));

    club.discuss(&dune(Some(7))).await;
    club.discuss(&dune(Some(8))).await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(club.cache().len(), 2);
}

#[tokio::test]
async fn fanout_preserves_catalog_order() {
    let (backend_url, _) = counting_backend().await;
    let titles = ["Dune", "Emma", "Ulysses", "Beloved", "Middlemarch"];
    let catalog_url = catalog_with(&titles).await;
    let club = club(&catalog_url, local(backend_url)).with_fanout(3);

    let results = club.search_and_discuss(&SearchQuery::default()).await;

    let got: Vec<_> = results.iter().map(|r| r.book.title.as_str()).collect();
    assert_eq!(got, titles);
    assert_eq!(
        results[0].cover_url.as_deref(),
        Some("https://covers.openlibrary.org/b/id/1-M.jpg")
    );
    assert!(results.iter().all(|r| r.generated.questions.len() == 2));
}

#[tokio::test]
async fn empty_output_without_templates_stays_empty() {
    let club = club(&common::dead_url().await, Backend::Disabled);
    let result = club.discuss(&dune(None)).await;
    assert!(result.summary.is_empty());
    assert!(result.questions.is_empty());
    assert_eq!(result.summary_origin, Origin::Empty);
    assert_eq!(result.questions_origin, Origin::Empty);
}

#[tokio::test]
async fn templates_fill_in_when_backend_is_unreachable() {
    let backend_url = format!("{}/api/generate", common::dead_url().await);
    let club = club(&common::dead_url().await, local(backend_url))
        .with_templates(FallbackTemplates::new(42))
        .with_question_count(4);

    let result = club.discuss(&dune(None)).await;

    assert!(result.summary.contains("Dune"));
    assert_eq!(result.summary_origin, Origin::Template);
    assert_eq!(result.questions.len(), 4);
    assert_eq!(result.questions_origin, Origin::Template);
}

#[tokio::test]
async fn unreachable_catalog_yields_no_discussions() {
    let club = club(&common::dead_url().await, Backend::Disabled);
    assert!(club
        .search_and_discuss(&SearchQuery::default())
        .await
        .is_empty());
}
