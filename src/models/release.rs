//! Release model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::client::PivnetClient;
use crate::error::{PivnetError, Result};
use crate::models::eula::Eula;
use crate::models::links::Links;
use crate::traits::{Create, Delete, Get, List, Update};

/// A release of a product.
///
/// Releases are versioned snapshots of a product. Each release can carry
/// an EULA, dependencies on other releases and upgrade paths from earlier
/// releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Numeric release ID.
    #[serde(default)]
    pub id: u64,

    /// Release version string (e.g. "1.7.2").
    #[serde(default)]
    pub version: String,

    /// Release type (e.g. "Minor Release").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,

    /// Release date, formatted `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Link to the release notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes_url: Option<String>,

    /// Who may see the release ("Admins Only", "All Users", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// EULA that must be accepted before downloading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eula: Option<Eula>,

    /// OSS compliance marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oss_compliant: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_support_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_guidance_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_availability_date: Option<String>,

    /// Whether the release is export controlled.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub controlled: bool,

    /// Export control classification number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eccn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_exception: Option<String>,

    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Hypermedia links.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// Identifies a release: the owning product slug plus the release ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseRef {
    /// Slug of the product that owns the release.
    pub product_slug: String,
    /// Numeric release ID.
    pub release_id: u64,
}

impl ReleaseRef {
    pub fn new(product_slug: impl Into<String>, release_id: u64) -> Self {
        Self {
            product_slug: product_slug.into(),
            release_id,
        }
    }

    /// Path of the release resource relative to the API prefix.
    pub(crate) fn path(&self) -> String {
        format!(
            "{}/{}",
            releases_path(&self.product_slug),
            self.release_id
        )
    }
}

fn releases_path(product_slug: &str) -> String {
    format!("products/{}/releases", urlencoding::encode(product_slug))
}

impl Release {
    /// Build a [`ReleaseRef`] for this release within `product_slug`.
    pub fn release_ref(&self, product_slug: &str) -> ReleaseRef {
        ReleaseRef::new(product_slug, self.id)
    }

    /// Check whether the release requires EULA acceptance.
    pub fn has_eula(&self) -> bool {
        self.eula.is_some()
    }

    /// Find the release of `product_slug` with exactly `version`.
    ///
    /// Lists all of the product's releases and returns the match.
    ///
    /// # Errors
    ///
    /// Returns [`PivnetError::ReleaseNotFound`] if no release carries the
    /// version, or any error from listing.
    #[tracing::instrument(skip(client))]
    pub async fn find_by_version(
        client: &PivnetClient,
        product_slug: &str,
        version: &str,
    ) -> Result<Self> {
        let releases = Self::list(client, &product_slug.to_string()).await?;
        releases
            .into_iter()
            .find(|r| r.version == version)
            .ok_or_else(|| PivnetError::ReleaseNotFound {
                product_slug: product_slug.to_string(),
                version: version.to_string(),
            })
    }
}

/// Parameters for creating a release.
#[derive(Debug, Clone, Default)]
pub struct CreateReleaseConfig {
    /// Slug of the product receiving the release.
    pub product_slug: String,
    pub version: String,
    pub release_type: String,
    /// Slug of the EULA attached to the release.
    pub eula_slug: String,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub release_notes_url: Option<String>,
    pub controlled: bool,
    pub eccn: Option<String>,
    pub license_exception: Option<String>,
    pub end_of_support_date: Option<String>,
    pub end_of_guidance_date: Option<String>,
    pub end_of_availability_date: Option<String>,
    /// Copy metadata from the previous release.
    pub copy_metadata: bool,
}

impl CreateReleaseConfig {
    /// Config with the required fields set.
    pub fn new(
        product_slug: impl Into<String>,
        version: impl Into<String>,
        release_type: impl Into<String>,
        eula_slug: impl Into<String>,
    ) -> Self {
        Self {
            product_slug: product_slug.into(),
            version: version.into(),
            release_type: release_type.into(),
            eula_slug: eula_slug.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateReleaseBody<'a> {
    release: NewRelease<'a>,
    copy_metadata: bool,
}

#[derive(Debug, Serialize)]
struct NewRelease<'a> {
    version: &'a str,
    release_type: &'a str,
    eula: EulaSlug<'a>,
    oss_compliant: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_notes_url: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    controlled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    eccn: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_exception: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_of_support_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_of_guidance_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_of_availability_date: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EulaSlug<'a> {
    slug: &'a str,
}

impl<'a> From<&'a CreateReleaseConfig> for CreateReleaseBody<'a> {
    fn from(config: &'a CreateReleaseConfig) -> Self {
        Self {
            release: NewRelease {
                version: &config.version,
                release_type: &config.release_type,
                eula: EulaSlug {
                    slug: &config.eula_slug,
                },
                oss_compliant: "confirm",
                release_date: config.release_date.as_deref(),
                description: config.description.as_deref(),
                release_notes_url: config.release_notes_url.as_deref(),
                controlled: config.controlled,
                eccn: config.eccn.as_deref(),
                license_exception: config.license_exception.as_deref(),
                end_of_support_date: config.end_of_support_date.as_deref(),
                end_of_guidance_date: config.end_of_guidance_date.as_deref(),
                end_of_availability_date: config.end_of_availability_date.as_deref(),
            },
            copy_metadata: config.copy_metadata,
        }
    }
}

/// Body of release-to-release link requests (dependencies, upgrade paths).
#[derive(Debug, Serialize)]
pub(crate) struct ReleaseIdBody {
    pub(crate) release_id: u64,
}

/// API response wrapper for listing releases.
#[derive(Debug, Deserialize)]
struct ReleasesResponse {
    #[serde(default)]
    releases: Vec<Release>,
}

/// API response wrapper for a single release.
#[derive(Debug, Serialize, Deserialize)]
struct ReleaseEnvelope {
    release: Release,
}

/// API response wrapper for release types.
#[derive(Debug, Deserialize)]
struct ReleaseTypesResponse {
    #[serde(default)]
    release_types: Vec<String>,
}

/// List the release types the API accepts (e.g. "Major Release").
#[tracing::instrument(skip(client))]
pub async fn release_types(client: &PivnetClient) -> Result<Vec<String>> {
    let response = client.get("releases/release_types").await?;
    let data: ReleaseTypesResponse = response.json().await.map_err(PivnetError::HttpError)?;
    Ok(data.release_types)
}

#[async_trait]
impl Get for Release {
    type Id = ReleaseRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PivnetClient, id: ReleaseRef) -> Result<Self> {
        let response = client.get(&id.path()).await?;
        let release: Release = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(release)
    }
}

#[async_trait]
impl List for Release {
    type Query = String; // Product slug

    #[tracing::instrument(skip(client))]
    async fn list(client: &PivnetClient, product_slug: &String) -> Result<Vec<Self>> {
        let response = client.get(&releases_path(product_slug)).await?;
        let data: ReleasesResponse = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.releases)
    }
}

#[async_trait]
impl Create for Release {
    type Params = CreateReleaseConfig;

    #[tracing::instrument(skip(client))]
    async fn create(client: &PivnetClient, params: CreateReleaseConfig) -> Result<Self> {
        let body = CreateReleaseBody::from(&params);

        let response = client
            .post(
                &releases_path(&params.product_slug),
                StatusCode::CREATED,
                &body,
            )
            .await?;
        let data: ReleaseEnvelope = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.release)
    }
}

#[async_trait]
impl Update for Release {
    type Id = String; // Product slug
    type Params = Release;

    #[tracing::instrument(skip(client))]
    async fn update(client: &PivnetClient, product_slug: String, release: Release) -> Result<Self> {
        let path = release.release_ref(&product_slug).path();
        let body = ReleaseEnvelope { release };

        let response = client.patch(&path, StatusCode::OK, &body).await?;
        let data: ReleaseEnvelope = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.release)
    }
}

#[async_trait]
impl Delete for Release {
    type Id = ReleaseRef;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &PivnetClient, id: ReleaseRef) -> Result<()> {
        client.delete(&id.path(), StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
