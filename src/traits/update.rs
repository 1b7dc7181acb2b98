//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::PivnetClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use pivnet::{PivnetClient, Release, ReleaseRef, Get, Update};
///
/// let client = PivnetClient::from_env()?;
/// let mut release = Release::get(&client, ReleaseRef::new("my-product", 1234)).await?;
/// release.description = Some("Patched".to_string());
/// let updated = Release::update(&client, "my-product".to_string(), release).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Parameters for the update.
    type Params: Send;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &PivnetClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
