//! HTTP layer exposing catalog search with generated discussion material.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::club::BookClub;

#[derive(Clone)]
pub struct AppState {
    pub club: Arc<BookClub>,
}

pub fn router(club: Arc<BookClub>) -> Router {
    let state = AppState { club };
    Router::new()
        .route("/health", get(routes::health))
        .route("/genres", get(routes::list_genres))
        .route("/books", get(routes::search_books))
        .route("/discuss", post(routes::discuss_book))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn serve(club: BookClub, host: String, port: u16) -> Result<()> {
    let router = router(Arc::new(club));
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving bookclub API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
