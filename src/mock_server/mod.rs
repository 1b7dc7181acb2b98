//! Mock Pivnet API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Pivnet
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing (add a dependency, then list it).
//!
//! # Example
//!
//! ```ignore
//! use pivnet::mock_server::MockServer;
//! use pivnet::{PivnetClient, Product, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = PivnetClient::new(server.client_config("test-token")).unwrap();
//!
//!     // Server comes with default fixtures
//!     let product = Product::get(&client, "pivnet-resource-test".to_string()).await.unwrap();
//!     assert_eq!(product.name, "Pivnet Resource Test");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, RELEASE_TYPES};
pub use server::MockServer;
pub use state::MockState;
