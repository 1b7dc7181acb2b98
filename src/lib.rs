//! Pivotal Network API client library.
//!
//! A Rust library for interacting with the Pivnet product release API using
//! a trait-based architecture where each operation (Get, List, Create,
//! Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use pivnet::{PivnetClient, Product, Release, ReleaseDependency, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> pivnet::Result<()> {
//!     // Create client from environment variables
//!     let client = PivnetClient::from_env()?;
//!
//!     // Get a product by slug
//!     let product = Product::get(&client, "pivotal-cf".to_string()).await?;
//!     println!("Product: {}", product.name);
//!
//!     // Find a release by version and list its dependencies
//!     let release = Release::find_by_version(&client, &product.slug, "1.7.2").await?;
//!     let deps = ReleaseDependency::list(&client, &release.release_ref(&product.slug)).await?;
//!     println!("Found {} dependencies", deps.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around five core traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch a collection of entities
//! - [`Create`] - Create an entity
//! - [`Update`] - Modify an existing entity
//! - [`Delete`] - Remove an entity
//!
//! Each entity type (like [`Product`] or [`Release`]) implements the traits
//! supported by its API endpoints. Link operations that return nothing
//! (dependencies, upgrade paths, EULA acceptance) are inherent methods.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PIVNET_API_TOKEN` (required) - Your Pivnet API token
//! - `PIVNET_ENDPOINT` (optional) - Host (defaults to `https://network.pivotal.io`)

mod client;
mod error;
mod models;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientConfig, PivnetClient, DEFAULT_HOST};
pub use error::{PivnetError, Result};
pub use output::{OutputFormat, PrettyPrint, Printer};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    // Product types
    Product,
    // Release types
    CreateReleaseConfig,
    Release,
    ReleaseRef,
    // Release link types
    DependentRelease,
    ReleaseDependency,
    ReleaseUpgradePath,
    UpgradePathRelease,
    // EULA types
    Eula,
    EulaAcceptance,
    // Shared
    Link,
    Links,
};

// Re-export convenience functions
pub use models::{check_authentication, release_types};
