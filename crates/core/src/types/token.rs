//! Session token pair and access-token claims.
//!
//! The token pair is the unit of persisted session state. It is serialized as
//! `{ "access_token": .., "expires": <epoch ms>, "refresh_token"?: .. }`.

use core::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::id::{RoleId, UserId};

/// Access token, absolute expiry and optional refresh token.
///
/// `expires` is an absolute Unix timestamp in milliseconds. Directus reports
/// a lifetime instead; use [`TokenPair::from_ttl`] to convert at the moment
/// the tokens are received.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Expiry of the access token, Unix epoch milliseconds.
    pub expires: i64,
    /// Token used to obtain a new pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Build a pair from a token lifetime reported by the backend.
    #[must_use]
    pub fn from_ttl(
        access_token: String,
        ttl_ms: i64,
        refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            expires: now.timestamp_millis().saturating_add(ttl_ms),
            refresh_token,
        }
    }

    /// The expiry as a timestamp, if it is representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expires)
    }

    /// Whether the access token has expired at `now`.
    ///
    /// A token is expired from its `expires` instant onwards.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires
    }

    /// Whether the access token expires within `margin` of `now`.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now.timestamp_millis()
            .saturating_add(margin.num_milliseconds())
            >= self.expires
    }

    /// Whether a refresh token is available.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Decode the claims carried by the access token.
    ///
    /// The signature is NOT verified; only the backend can do that. Use the
    /// claims for display and diagnostics, never for authorization.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is not a JWT or its payload is
    /// not valid JSON claims.
    pub fn claims(&self) -> Result<AccessClaims, ClaimsError> {
        AccessClaims::decode(&self.access_token)
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("expires", &self.expires)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Errors that can occur when decoding [`AccessClaims`].
#[derive(thiserror::Error, Debug)]
pub enum ClaimsError {
    /// The token does not have three dot-separated segments.
    #[error("access token is not a JWT")]
    Malformed,
    /// The payload segment is not valid base64url.
    #[error("invalid token payload encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The payload is not the expected JSON.
    #[error("invalid token payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Claims Directus puts in its access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The authenticated user.
    pub id: UserId,
    /// The user's role, absent for role-less users.
    #[serde(default)]
    pub role: Option<RoleId>,
    /// Whether the user may use the Data Studio app.
    #[serde(default)]
    pub app_access: bool,
    /// Whether the user has admin access.
    #[serde(default)]
    pub admin_access: bool,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
    /// Issuer, `directus` for stock installs.
    pub iss: String,
}

impl AccessClaims {
    /// Decode the payload segment of a JWT without verifying it.
    ///
    /// # Errors
    ///
    /// See [`TokenPair::claims`].
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => return Err(ClaimsError::Malformed),
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
