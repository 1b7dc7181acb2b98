//! Product model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::PivnetClient;
use crate::error::{PivnetError, Result};
use crate::traits::{Get, List};

/// A product published on Pivnet.
///
/// Products are the top-level containers; each product owns a set of
/// releases and is addressed by its slug in URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product ID.
    #[serde(default)]
    pub id: u64,

    /// URL-safe product identifier (e.g. "pivotal-cf").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// API response wrapper for listing products.
#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[async_trait]
impl Get for Product {
    type Id = String; // Product slug

    #[tracing::instrument(skip(client))]
    async fn get(client: &PivnetClient, slug: String) -> Result<Self> {
        let path = format!("products/{}", urlencoding::encode(&slug));

        let response = client.get(&path).await?;
        let product: Product = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(product)
    }
}

#[async_trait]
impl List for Product {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list(client: &PivnetClient, _query: &()) -> Result<Vec<Self>> {
        let response = client.get("products").await?;
        let data: ProductsResponse = response.json().await.map_err(PivnetError::HttpError)?;
        Ok(data.products)
    }
}
