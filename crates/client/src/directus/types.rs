//! Wire types for the Directus authentication endpoints.

use serde::{Deserialize, Serialize};

/// Directus success envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub data: T,
}

/// Token delivery mode. JSON mode returns the refresh token in the body
/// instead of setting a cookie.
pub(super) const MODE_JSON: &str = "json";

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub mode: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
    pub mode: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
    pub mode: &'static str,
}

/// Tokens returned by `/auth/login` and `/auth/refresh`.
///
/// `expires` is the access token lifetime in milliseconds, not a timestamp.
#[derive(Clone, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AuthData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthData")
            .field("access_token", &"[REDACTED]")
            .field("expires", &self.expires)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
