//! Release dependency model and trait implementations.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::PivnetClient;
use crate::error::{PivnetError, Result};
use crate::models::product::Product;
use crate::models::release::{ReleaseIdBody, ReleaseRef};
use crate::traits::List;

/// A release that another release depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDependency {
    pub release: DependentRelease,
}

/// The dependent release, with the product it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentRelease {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub version: String,

    /// Owning product (only `id` and `name` are populated by the API).
    #[serde(default)]
    pub product: Product,
}

#[derive(Debug, Deserialize)]
struct ReleaseDependenciesResponse {
    #[serde(default)]
    dependencies: Vec<ReleaseDependency>,
}

#[derive(Debug, Serialize)]
struct DependencyBody {
    dependency: ReleaseIdBody,
}

impl ReleaseDependency {
    /// Make `release` depend on the release with ID `dependent_release_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the link or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn add(
        client: &PivnetClient,
        release: &ReleaseRef,
        dependent_release_id: u64,
    ) -> Result<()> {
        Self::modify(client, release, "add_dependency", dependent_release_id).await
    }

    /// Remove the dependency of `release` on `dependent_release_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the change or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn remove(
        client: &PivnetClient,
        release: &ReleaseRef,
        dependent_release_id: u64,
    ) -> Result<()> {
        Self::modify(client, release, "remove_dependency", dependent_release_id).await
    }

    async fn modify(
        client: &PivnetClient,
        release: &ReleaseRef,
        action: &str,
        dependent_release_id: u64,
    ) -> Result<()> {
        let path = format!("{}/{}", release.path(), action);
        let body = DependencyBody {
            dependency: ReleaseIdBody {
                release_id: dependent_release_id,
            },
        };

        client.patch(&path, StatusCode::NO_CONTENT, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl List for ReleaseDependency {
    type Query = ReleaseRef;

    #[tracing::instrument(skip(client))]
    async fn list(client: &PivnetClient, release: &ReleaseRef) -> Result<Vec<Self>> {
        let path = format!("{}/dependencies", release.path());

        let response = client.get(&path).await?;
        let data: ReleaseDependenciesResponse =
            response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.dependencies)
    }
}
