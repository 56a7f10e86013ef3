//! Error types for the tiohelpers CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for tiohelpers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check your ACCESS_KEY and SECRET_KEY.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration and user-input errors. Always raised before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `tiohelpers init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("ACCESS_KEY must be defined")]
    MissingAccessKey,

    #[error("SECRET_KEY must be defined")]
    MissingSecretKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Failures of a paginated collection run.
///
/// Side effects applied for earlier pages are never rolled back; `page` is the
/// 1-based page number on which the run was abandoned.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Search failed on page {page}: {source}")]
    SearchFailed {
        page: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Side effect failed on page {page}: {source}")]
    SideEffectFailed {
        page: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Pagination exceeded {max_pages} pages, the cursor is probably cycling")]
    PaginationExceeded { max_pages: usize },
}
