//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::PivnetClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (a slug, or a product slug plus release ID).
///
/// # Example
///
/// ```ignore
/// use pivnet::{PivnetClient, Product, Get};
///
/// let client = PivnetClient::from_env()?;
/// let product = Product::get(&client, "my-product".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &PivnetClient, id: Self::Id) -> Result<Self>;
}
