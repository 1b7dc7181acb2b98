//! Error types for Pivnet API operations.

use thiserror::Error;

/// Errors that can occur during Pivnet API operations.
#[derive(Debug, Error)]
pub enum PivnetError {
    /// Configuration is missing or incomplete.
    #[error("Pivnet configuration required: {0}")]
    ConfigMissing(String),

    /// The API token was rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The requested resource does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// No release of the product carries the requested version.
    #[error("Release '{version}' not found for product '{product_slug}'")]
    ReleaseNotFound {
        product_slug: String,
        version: String,
    },

    /// The resource is withheld (export control or EULA restrictions).
    #[error("Unavailable for legal reasons: {message}")]
    UnavailableForLegalReasons { message: String },

    /// API request failed with an unexpected status.
    #[error("Pivnet API error ({status_code}): {message}{}", format_errors(.errors))]
    ApiError {
        message: String,
        status_code: u16,
        errors: Vec<String>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("Failed to render YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Writing command output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl PivnetError {
    /// The HTTP status code behind this error, if it came from the API.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::UnavailableForLegalReasons { .. } => Some(451),
            Self::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

fn format_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" [{}]", errors.join("; "))
    }
}

/// Result type alias for Pivnet operations.
pub type Result<T> = core::result::Result<T, PivnetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_errors() {
        let err = PivnetError::ApiError {
            message: "foo message".to_string(),
            status_code: 418,
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Pivnet API error (418): foo message [first; second]"
        );
    }

    #[test]
    fn test_api_error_display_without_errors() {
        let err = PivnetError::ApiError {
            message: "foo message".to_string(),
            status_code: 500,
            errors: vec![],
        };
        assert_eq!(err.to_string(), "Pivnet API error (500): foo message");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_status_code_for_mapped_errors() {
        let err = PivnetError::NotFound {
            message: "gone".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));

        let err = PivnetError::ConfigMissing("token".to_string());
        assert_eq!(err.status_code(), None);
    }
}
