//! Session-level error type.
//!
//! Everything [`crate::AuthSession`] returns fails with [`AuthError`]. Raw
//! transport errors are logged where they happen and only their message
//! crosses this boundary.

use thiserror::Error;

use crate::directus::{ApiError, DirectusError};
use crate::storage::StorageError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email is not usable as a login identifier.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] creators_corner_core::EmailError),

    /// Some other argument was rejected before contacting the backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Login was refused or could not be completed.
    #[error("{0}")]
    Login(String),

    /// The backend answered, but not with usable tokens.
    #[error("invalid authentication response: {0}")]
    InvalidResponse(String),

    /// There is no live session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The backend could not be reached.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend returned an error.
    #[error(transparent)]
    Api(ApiError),

    /// Session storage failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<DirectusError> for AuthError {
    fn from(err: DirectusError) -> Self {
        match err {
            DirectusError::Api(api) => Self::Api(api),
            DirectusError::Parse(message) => Self::InvalidResponse(message),
            DirectusError::Http(e) => Self::Transport(e.to_string()),
            DirectusError::Url(e) => Self::Transport(e.to_string()),
        }
    }
}

impl AuthError {
    /// Whether the caller has to log in (again) to proceed.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        match self {
            Self::NotAuthenticated => true,
            Self::Api(api) => api.is_unauthenticated(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_directus_error() {
        let api = ApiError {
            status: 500,
            code: Some("INTERNAL_SERVER_ERROR".to_string()),
            message: "boom".to_string(),
        };
        assert!(matches!(
            AuthError::from(DirectusError::Api(api)),
            AuthError::Api(_)
        ));
        assert!(matches!(
            AuthError::from(DirectusError::Parse("x".to_string())),
            AuthError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_requires_login() {
        assert!(AuthError::NotAuthenticated.requires_login());
        assert!(
            AuthError::Api(ApiError {
                status: 401,
                code: None,
                message: "expired".to_string(),
            })
            .requires_login()
        );
        assert!(!AuthError::Transport("timeout".to_string()).requires_login());
    }
}
