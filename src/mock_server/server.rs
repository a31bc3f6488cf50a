//! Mock Enginn API server.
//!
//! Provides an axum-based HTTP server that simulates the Enginn API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Enginn API server for testing.
///
/// The server runs in the background and can be used to test the Enginn
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{addr}"),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `EnginnClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Project routes
            .route("/projects", get(handlers::list_projects))
            .route(
                "/projects/:uid",
                get(handlers::get_project).patch(handlers::update_project),
            )
            // Nested resource routes
            .route(
                "/projects/:uid/:path",
                get(handlers::list_resources).post(handlers::create_resource),
            )
            .route(
                "/projects/:uid/:path/:id",
                get(handlers::get_resource)
                    .patch(handlers::update_resource)
                    .delete(handlers::delete_resource),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::DEFAULT_PROJECT_UID;
    use crate::{EnginnClient, ErrorKind};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_fetch_project_with_enginn_client() {
        let server = MockServer::start().await;
        let client = EnginnClient::new("test-token", server.url()).unwrap();

        let mut project = client.project(DEFAULT_PROJECT_UID);
        project.fetch().await.expect("Failed to fetch project");

        assert_eq!(project.name(), Some("Test Project"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_characters_with_enginn_client() {
        let server = MockServer::start().await;
        let client = EnginnClient::new("test-token", server.url()).unwrap();

        let characters = client
            .project(DEFAULT_PROJECT_UID)
            .characters()
            .collect_all()
            .await
            .expect("Failed to list characters");

        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].name(), Some("Rocky"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = EnginnClient::new("test-token", server.url()).unwrap();

        let err = client.project("nonexistent").fetch().await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let server =
            MockServer::with_state(Fixtures::default_scenario().with_required_token("secret"))
                .await;
        let client = EnginnClient::new("wrong", server.url()).unwrap();

        let err = client
            .project(DEFAULT_PROJECT_UID)
            .fetch()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));

        server.shutdown().await;
    }
}
