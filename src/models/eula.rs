//! EULA model and trait implementations.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::PivnetClient;
use crate::error::{PivnetError, Result};
use crate::models::links::Links;
use crate::models::release::ReleaseRef;
use crate::traits::{Get, List};

/// An end-user license agreement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eula {
    #[serde(default)]
    pub id: u64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Full agreement text (HTML). Only returned by the single-EULA endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Confirmation returned when a EULA is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EulaAcceptance {
    /// Timestamp of the acceptance, as reported by the API.
    #[serde(default)]
    pub accepted_at: String,
}

#[derive(Debug, Deserialize)]
struct EulasResponse {
    #[serde(default)]
    eulas: Vec<Eula>,
}

impl Eula {
    /// Accept the EULA attached to a release.
    ///
    /// # Errors
    ///
    /// Returns an error if the release does not exist or the request fails.
    #[tracing::instrument(skip(client))]
    pub async fn accept(client: &PivnetClient, release: &ReleaseRef) -> Result<EulaAcceptance> {
        let path = format!("{}/eula_acceptance", release.path());

        let response = client.post_empty(&path, StatusCode::OK).await?;
        let acceptance: EulaAcceptance =
            response.json().await.map_err(PivnetError::HttpError)?;
        Ok(acceptance)
    }
}

#[async_trait]
impl Get for Eula {
    type Id = String; // EULA slug

    #[tracing::instrument(skip(client))]
    async fn get(client: &PivnetClient, slug: String) -> Result<Self> {
        let path = format!("eulas/{}", urlencoding::encode(&slug));

        let response = client.get(&path).await?;
        let eula: Eula = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(eula)
    }
}

#[async_trait]
impl List for Eula {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &PivnetClient, _query: &()) -> Result<Vec<Self>> {
        let response = client.get("eulas").await?;
        let data: EulasResponse = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.eulas)
    }
}
