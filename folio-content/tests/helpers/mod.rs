//! Test Helper Utilities
//!
//! Shared utilities for folio-content integration tests

#![allow(dead_code)]

use axum::Router;
use folio_common::api::Credentials;
use folio_content::ApiClient;
use tokio::net::TcpListener;

pub mod log_capture;

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn dead_server_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn anonymous_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Credentials::anonymous(), None).unwrap()
}
