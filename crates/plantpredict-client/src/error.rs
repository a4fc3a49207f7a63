//! Error types for PlantPredict client operations

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for PlantPredict client operations
pub type Result<T> = std::result::Result<T, PlantPredictError>;

/// Errors that can occur during PlantPredict client operations
#[derive(Error, Debug)]
pub enum PlantPredictError {
    /// Transport could not complete (DNS, TCP reset, timeout). Never retried.
    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    /// Service rejected the bearer token, and the single refresh+retry did not help
    #[error("Authentication expired: {body}")]
    AuthExpired { body: String },

    /// Service returned a non-2xx status other than 401
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Operation needs a remote id but the entity has none
    #[error("{resource} has no id; create or assign one first")]
    MissingId { resource: &'static str },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request could not be built
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Failed to parse a successful response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Local I/O failed (e.g. binding the test listener)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PlantPredictError {
    /// Create an API error from status code and body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Map a transport error from reqwest.
    ///
    /// Builder errors are local mistakes; everything else means the round trip
    /// did not complete.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Http(err)
        } else {
            Self::ConnectionFailure(err.to_string())
        }
    }

    /// HTTP status carried by this error, if it came from the service
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { .. } => Some(401),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
