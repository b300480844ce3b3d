use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the movie backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the movie backend: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the backend's `error` field when the
    /// body is an error envelope, otherwise the body text.
    #[error("{message} (HTTP {})", .status.as_u16())]
    Status { status: StatusCode, message: String },
    #[error("movie backend returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Network(err) => err.status(),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(err) if err.is_timeout())
    }
}

/// Failures resolving [`crate::ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{value}' must be an absolute http or https URL")]
    UnsupportedBaseUrl { value: String },
    #[error("invalid HTTP timeout '{value}'")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
