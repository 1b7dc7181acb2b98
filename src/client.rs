//! Pivnet API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::error::{PivnetError, Result};

/// Default Pivnet host.
pub const DEFAULT_HOST: &str = "https://network.pivotal.io";

const API_PREFIX: &str = "/api/v2/";
const USER_AGENT: &str = concat!("pivnet-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`PivnetClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the API, without the `/api/v2` prefix.
    pub host: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Accept invalid TLS certificates.
    pub skip_ssl_validation: bool,
}

impl ClientConfig {
    /// Config for the default host with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: token.into(),
            user_agent: USER_AGENT.to_string(),
            skip_ssl_validation: false,
        }
    }

    /// Override the API host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Toggle TLS certificate validation.
    #[must_use]
    pub fn with_skip_ssl_validation(mut self, skip: bool) -> Self {
        self.skip_ssl_validation = skip;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("user_agent", &self.user_agent)
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .finish_non_exhaustive()
    }
}

/// Low-level Pivnet API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update` and `Delete`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use pivnet::{ClientConfig, PivnetClient};
///
/// # fn example() -> pivnet::Result<()> {
/// // Create from environment variables
/// let client = PivnetClient::from_env()?;
///
/// // Or configure manually
/// let client = PivnetClient::new(
///     ClientConfig::new("your-api-token").with_host("https://network.pivotal.io"),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PivnetClient {
    http: Client,
    base_url: Arc<Url>,
    token: Arc<str>,
}

impl std::fmt::Debug for PivnetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PivnetClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PivnetClient {
    /// Create a client from environment variables.
    ///
    /// Uses `PIVNET_API_TOKEN` for authentication and optionally
    /// `PIVNET_ENDPOINT` for the host (defaults to `https://network.pivotal.io`).
    ///
    /// # Errors
    ///
    /// Returns an error if `PIVNET_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("PIVNET_API_TOKEN").map_err(|_| {
            PivnetError::ConfigMissing("PIVNET_API_TOKEN environment variable not set".to_string())
        })?;

        let host = env::var("PIVNET_ENDPOINT").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        Self::new(ClientConfig::new(token).with_host(host))
    }

    /// Create a new client from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&format!(
            "{}{}",
            config.host.trim_end_matches('/'),
            API_PREFIX
        ))?;

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(PivnetError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: Arc::from(config.token),
        })
    }

    /// Get the base URL, including the `/api/v2/` prefix.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a request and check the response status.
    ///
    /// `path` is relative to the API prefix (e.g. `products/my-product`).
    /// The response is returned only if its status equals `expected`;
    /// any other status is converted to a [`PivnetError`].
    #[tracing::instrument(skip(self, body))]
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        expected: StatusCode,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, %url, "making request");

        let auth = HeaderValue::from_str(&format!("Token {}", self.token)).map_err(|_| {
            PivnetError::ConfigMissing("API token contains invalid header characters".to_string())
        })?;

        let mut builder = self.http.request(method, url).header(AUTHORIZATION, auth);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(PivnetError::HttpError)?;
        tracing::debug!(status = response.status().as_u16(), "received response");

        Self::check_response(response, expected).await
    }

    /// Make a GET request expecting `200 OK`.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.request::<()>(Method::GET, path, StatusCode::OK, None)
            .await
    }

    /// Make a POST request with JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        expected: StatusCode,
        body: &B,
    ) -> Result<Response> {
        self.request(Method::POST, path, expected, Some(body)).await
    }

    /// Make a POST request without a body.
    pub async fn post_empty(&self, path: &str, expected: StatusCode) -> Result<Response> {
        self.request::<()>(Method::POST, path, expected, None).await
    }

    /// Make a PATCH request with JSON body.
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        expected: StatusCode,
        body: &B,
    ) -> Result<Response> {
        self.request(Method::PATCH, path, expected, Some(body)).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str, expected: StatusCode) -> Result<Response> {
        self.request::<()>(Method::DELETE, path, expected, None)
            .await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response, expected: StatusCode) -> Result<Response> {
        let status = response.status();

        if status == expected {
            return Ok(response);
        }

        // Handle rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(PivnetError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let (message, errors) = Self::extract_error_message(response, status).await;
        Err(match status {
            StatusCode::UNAUTHORIZED => PivnetError::Unauthorized { message },
            StatusCode::NOT_FOUND => PivnetError::NotFound { message },
            StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS => {
                PivnetError::UnavailableForLegalReasons { message }
            }
            _ => PivnetError::ApiError {
                message,
                status_code: status.as_u16(),
                errors,
            },
        })
    }

    /// Extract error message and detail list from a failed response.
    async fn extract_error_message(
        response: Response,
        status: StatusCode,
    ) -> (String, Vec<String>) {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return (format!("HTTP {status}"), Vec::new()),
        };

        parse_error_body(&body, status)
    }
}

/// Pull `message` (or `error`) and `errors` out of an error body.
///
/// Falls back to the raw body, then to `HTTP <status>`, for the message.
fn parse_error_body(body: &str, status: StatusCode) -> (String, Vec<String>) {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();

    let errors = json
        .as_ref()
        .and_then(|json| json.get("errors"))
        .and_then(|e| e.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let message = json
        .as_ref()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|m| m.as_str()))
        })
        .map(str::to_string);

    let message = match message {
        Some(msg) => msg,
        None if body.trim().is_empty() => format!("HTTP {status}"),
        None => body.to_string(),
    };

    (message, errors)
}
