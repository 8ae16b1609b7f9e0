#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use axum::Router;
use bookclub::{
    catalog::{cover::DEFAULT_COVERS_BASE, CatalogClient},
    generate::{Backend, Generator},
};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("stub server");
    });
    format!("http://{addr}")
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn catalog(search_url: &str) -> CatalogClient {
    CatalogClient::with_endpoint(search_url, DEFAULT_COVERS_BASE, Duration::from_secs(5))
        .expect("catalog client")
}

pub fn generator(backend: Backend) -> Generator {
    Generator::with_backend(backend, 0.8, Duration::from_secs(5)).expect("generator")
}
