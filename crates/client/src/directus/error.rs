//! Error types for the Directus REST client.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to Directus.
#[derive(Debug, Error)]
pub enum DirectusError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Directus answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// An endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl DirectusError {
    /// Whether the backend rejected the caller's identity (401 or 403).
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_unauthenticated())
    }
}

/// An error response from the Directus API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Directus error code (`extensions.code`), e.g. `INVALID_CREDENTIALS`.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Whether the status means the credentials or token were rejected.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Build an error from a status code and raw response body.
    ///
    /// Uses the first entry of a Directus `errors` array when the body has
    /// one, otherwise the body text, otherwise the status reason phrase.
    #[must_use]
    pub fn from_body(status: reqwest::StatusCode, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
            && let Some(first) = parsed.errors.into_iter().next()
        {
            return Self {
                status: status.as_u16(),
                code: first.extensions.and_then(|ext| ext.code),
                message: first.message,
            };
        }

        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.trim().to_string()
        };

        Self {
            status: status.as_u16(),
            code: None,
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "API error {} ({code}): {}", self.status, self.message),
            None => write!(f, "API error {}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Directus error envelope.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
    extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct ErrorExtensions {
    code: Option<String>,
}
