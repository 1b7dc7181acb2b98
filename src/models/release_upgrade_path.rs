//! Release upgrade path model and trait implementations.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::PivnetClient;
use crate::error::{PivnetError, Result};
use crate::models::release::{ReleaseIdBody, ReleaseRef};
use crate::traits::List;

/// An earlier release that can be upgraded to a given release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseUpgradePath {
    pub release: UpgradePathRelease,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePathRelease {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ReleaseUpgradePathsResponse {
    #[serde(default)]
    upgrade_paths: Vec<ReleaseUpgradePath>,
}

#[derive(Debug, Serialize)]
struct UpgradePathBody {
    upgrade_path: ReleaseIdBody,
}

impl ReleaseUpgradePath {
    /// Allow upgrading to `release` from `previous_release_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the path or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn add(
        client: &PivnetClient,
        release: &ReleaseRef,
        previous_release_id: u64,
    ) -> Result<()> {
        Self::modify(client, release, "add_upgrade_path", previous_release_id).await
    }

    /// Remove the upgrade path to `release` from `previous_release_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the change or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn remove(
        client: &PivnetClient,
        release: &ReleaseRef,
        previous_release_id: u64,
    ) -> Result<()> {
        Self::modify(client, release, "remove_upgrade_path", previous_release_id).await
    }

    async fn modify(
        client: &PivnetClient,
        release: &ReleaseRef,
        action: &str,
        previous_release_id: u64,
    ) -> Result<()> {
        let path = format!("{}/{}", release.path(), action);
        let body = UpgradePathBody {
            upgrade_path: ReleaseIdBody {
                release_id: previous_release_id,
            },
        };

        client.patch(&path, StatusCode::NO_CONTENT, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl List for ReleaseUpgradePath {
    type Query = ReleaseRef;

    #[tracing::instrument(skip(client))]
    async fn list(client: &PivnetClient, release: &ReleaseRef) -> Result<Vec<Self>> {
        let path = format!("{}/upgrade_paths", release.path());

        let response = client.get(&path).await?;
        let data: ReleaseUpgradePathsResponse =
            response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.upgrade_paths)
    }
}
