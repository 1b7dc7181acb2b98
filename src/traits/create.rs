//! Create trait for adding new entities.

use async_trait::async_trait;

use crate::client::PivnetClient;
use crate::error::Result;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use pivnet::{PivnetClient, Release, CreateReleaseConfig, Create};
///
/// let client = PivnetClient::from_env()?;
/// let release = Release::create(
///     &client,
///     CreateReleaseConfig::new("my-product", "1.2.3", "Minor Release", "pivotal_software_eula"),
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters describing the new entity.
    type Params: Send;

    /// Create the entity and return it as stored by the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or fails.
    async fn create(client: &PivnetClient, params: Self::Params) -> Result<Self>;
}
