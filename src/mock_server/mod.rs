//! Mock Enginn API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Enginn
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use enginn::mock_server::{MockServer, DEFAULT_PROJECT_UID};
//! use enginn::EnginnClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = EnginnClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let mut project = client.project(DEFAULT_PROJECT_UID);
//!     project.fetch().await.unwrap();
//!     assert_eq!(project.name(), Some("Test Project"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, DEFAULT_PROJECT_UID};
pub use handlers::DEFAULT_PER;
pub use server::MockServer;
pub use state::{MockState, Record};
