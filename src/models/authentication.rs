//! Token verification.

use crate::client::PivnetClient;
use crate::error::Result;

/// Verify that the client's API token is accepted.
///
/// # Errors
///
/// Returns [`PivnetError::Unauthorized`](crate::PivnetError::Unauthorized)
/// if the token is rejected, or any transport error.
#[tracing::instrument(skip(client))]
pub async fn check_authentication(client: &PivnetClient) -> Result<()> {
    client.get("authentication").await?;
    Ok(())
}
