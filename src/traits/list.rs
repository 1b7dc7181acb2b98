//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::PivnetClient;
use crate::error::Result;

/// List entities belonging to a scope.
///
/// The Pivnet API returns whole collections wrapped in a JSON envelope
/// (e.g. `{"releases": [...]}`); implementations unwrap the envelope.
///
/// # Example
///
/// ```ignore
/// use pivnet::{PivnetClient, Release, List};
///
/// let client = PivnetClient::from_env()?;
/// let releases = Release::list(&client, &"my-product".to_string()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Scope of the listing (`()` for top-level collections).
    type Query: Send + Sync;

    /// List all entities in the given scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &PivnetClient, query: &Self::Query) -> Result<Vec<Self>>;
}
