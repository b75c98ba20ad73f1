//! The auth session: login, logout, current user, and token upkeep.
//!
//! # State
//!
//! A session is either anonymous (no stored token pair) or authenticated
//! (one stored pair). Login moves it to authenticated; logout, a rejected
//! refresh, or expiry move it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use creators_corner_client::{AuthSession, ClientConfig};
//! use secrecy::SecretString;
//!
//! let config = ClientConfig::from_env()?;
//! let session = AuthSession::from_config(&config)?;
//!
//! session.login("maker@example.com", &SecretString::from(password)).await?;
//! if let Some(user) = session.get_current_user().await? {
//!     tracing::info!("signed in as {}", user.display_name());
//! }
//! session.logout().await?;
//! ```

use chrono::{DateTime, Duration, Utc};
use creators_corner_core::{Collection, Email, TokenPair, UserProfile};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::directus::{AuthApi, AuthData, DirectusClient, DirectusError, Query};
use crate::error::AuthError;
use crate::storage::{FileStore, KeyValueStore, TokenStore};

/// Default refresh margin: five minutes before expiry.
const DEFAULT_REFRESH_MARGIN_MS: i64 = 300_000;

/// Authentication state bound to one backend and one token store.
///
/// All methods take `&self`; share the session by reference or behind an
/// `Arc`. Concurrent logins race on the stored record and the last write
/// wins.
pub struct AuthSession<A, S, C = SystemClock> {
    api: A,
    tokens: TokenStore<S>,
    clock: C,
    refresh_margin: Duration,
}

impl AuthSession<DirectusClient, FileStore> {
    /// A session against the configured Directus instance, persisting to
    /// the configured storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, DirectusError> {
        let api = DirectusClient::new(config)?;
        let store = FileStore::new(config.storage_dir.clone());
        Ok(Self::new(api, store).with_refresh_margin(config.refresh_margin))
    }
}

impl<A: AuthApi, S: KeyValueStore> AuthSession<A, S> {
    /// A session using the system clock.
    pub fn new(api: A, store: S) -> Self {
        Self::with_clock(api, store, SystemClock)
    }
}

impl<A: AuthApi, S: KeyValueStore, C: Clock> AuthSession<A, S, C> {
    /// A session reading time from `clock`.
    pub fn with_clock(api: A, store: S, clock: C) -> Self {
        Self {
            api,
            tokens: TokenStore::new(store),
            clock,
            refresh_margin: Duration::milliseconds(DEFAULT_REFRESH_MARGIN_MS),
        }
    }

    /// Refresh tokens when they are this close to expiry.
    #[must_use]
    pub const fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// The backend this session talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Log in with email and password and persist the returned tokens.
    ///
    /// Nothing is stored unless the backend returns a usable token pair.
    ///
    /// # Errors
    ///
    /// - `InvalidEmail` / `InvalidInput` for unusable arguments (no request
    ///   is made)
    /// - `Login` with a readable message when the backend refuses the
    ///   credentials or cannot be reached
    /// - `InvalidResponse` when the backend answers without usable tokens
    /// - `Storage` when the tokens cannot be persisted
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<TokenPair, AuthError> {
        let email = Email::parse(email)?;
        if password.expose_secret().is_empty() {
            return Err(AuthError::InvalidInput("password cannot be empty".to_string()));
        }

        let data = self.api.login(&email, password).await.map_err(|e| {
            tracing::error!(error = %e, "Login failed");
            login_failure(e)
        })?;

        let pair = token_pair_from(data, None, self.clock.now())?;
        self.tokens.save(&pair)?;

        tracing::info!(email = %email, expires = pair.expires, "Logged in");
        Ok(pair)
    }

    /// End the session.
    ///
    /// The stored pair is cleared first. The server-side session is then
    /// revoked on a best-effort basis: a failed revoke is logged, not
    /// returned, because the local session is already gone.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the stored pair cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let stored = self.auth_state();
        self.tokens.clear()?;

        match stored.and_then(|pair| pair.refresh_token).filter(|t| !t.is_empty()) {
            Some(refresh_token) => {
                if let Err(e) = self.api.logout(&refresh_token).await {
                    tracing::warn!(error = %e, "Remote logout failed; local session cleared");
                }
            }
            None => tracing::debug!("No refresh token stored; skipping remote logout"),
        }

        tracing::info!("Logged out");
        Ok(())
    }

    /// The authenticated user, or `None` when there is no session.
    ///
    /// Returns `None` without a request when no token is stored, and when
    /// the backend rejects the stored token.
    ///
    /// # Errors
    ///
    /// Transport failures and server errors are returned rather than
    /// reported as "not logged in".
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let pair = match self.ensure_fresh().await {
            Ok(Some(pair)) => pair,
            Ok(None) | Err(AuthError::NotAuthenticated) => return Ok(None),
            Err(e) => return Err(e),
        };

        match self
            .api
            .current_user(&pair.access_token, UserProfile::PROFILE_FIELDS)
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!(error = %e, "Stored token rejected");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch current user");
                Err(e.into())
            }
        }
    }

    /// The stored token pair, if any.
    ///
    /// A record that cannot be read is logged and treated as absent.
    pub fn auth_state(&self) -> Option<TokenPair> {
        match self.tokens.load() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session record");
                None
            }
        }
    }

    /// Whether the session counts as expired.
    ///
    /// True when nothing is stored or the stored expiry has passed.
    pub fn is_token_expired(&self) -> bool {
        self.auth_state()
            .is_none_or(|pair| pair.is_expired_at(self.clock.now()))
    }

    /// Exchange the stored refresh token for a new pair and store it.
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` when nothing is stored, the stored pair has no
    ///   refresh token, or the backend rejects it (the stored pair is then
    ///   cleared)
    /// - `Transport` / `Api` / `InvalidResponse` for other failures, leaving
    ///   the stored pair untouched
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<TokenPair, AuthError> {
        let stored = self.auth_state().ok_or(AuthError::NotAuthenticated)?;
        let refresh_token = stored
            .refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::NotAuthenticated)?;

        let data = match self.api.refresh(&refresh_token).await {
            Ok(data) => data,
            Err(e) if e.is_unauthenticated() => {
                tracing::info!(error = %e, "Refresh token rejected; clearing session");
                self.tokens.clear()?;
                return Err(AuthError::NotAuthenticated);
            }
            Err(e) => {
                tracing::error!(error = %e, "Token refresh failed");
                return Err(e.into());
            }
        };

        let pair = token_pair_from(data, Some(refresh_token), self.clock.now())?;
        self.tokens.save(&pair)?;

        tracing::debug!(expires = pair.expires, "Refreshed session tokens");
        Ok(pair)
    }

    /// The stored pair, refreshed first if it is about to expire.
    ///
    /// Returns `None` when nothing is stored, or when the pair has expired
    /// and cannot be refreshed. If a refresh of a still-valid pair fails for
    /// a reason other than rejection, the current pair is returned.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::refresh`].
    pub async fn ensure_fresh(&self) -> Result<Option<TokenPair>, AuthError> {
        let Some(pair) = self.auth_state() else {
            return Ok(None);
        };

        let now = self.clock.now();
        if !pair.expires_within(now, self.refresh_margin) {
            return Ok(Some(pair));
        }

        if !pair.can_refresh() {
            return Ok((!pair.is_expired_at(now)).then_some(pair));
        }

        match self.refresh().await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(e) if !e.requires_login() && !pair.is_expired_at(now) => {
                tracing::warn!(error = %e, "Early refresh failed; using current token");
                Ok(Some(pair))
            }
            Err(e) => Err(e),
        }
    }

    /// Read items of collection `Coll`.
    ///
    /// Uses the session's token when there is one and reads anonymously
    /// otherwise, so public collections work before login.
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Api` or `InvalidResponse` on failure.
    #[instrument(skip(self, query), fields(collection = Coll::NAME))]
    pub async fn read_items<Coll: Collection>(&self, query: &Query) -> Result<Vec<Coll>, AuthError> {
        let pair = match self.ensure_fresh().await {
            Ok(pair) => pair,
            Err(AuthError::NotAuthenticated) => None,
            Err(e) => return Err(e),
        };

        let token = pair.as_ref().map(|p| p.access_token.as_str());
        Ok(self.api.read_items::<Coll>(token, query).await?)
    }
}

/// Validate a token response and make its expiry absolute.
///
/// `previous_refresh` is kept when the backend does not rotate the refresh
/// token.
fn token_pair_from(
    data: AuthData,
    previous_refresh: Option<String>,
    now: DateTime<Utc>,
) -> Result<TokenPair, AuthError> {
    if data.access_token.is_empty() {
        return Err(AuthError::InvalidResponse("missing access token".to_string()));
    }

    let ttl = data
        .expires
        .filter(|ttl| *ttl > 0)
        .ok_or_else(|| AuthError::InvalidResponse("missing token expiry".to_string()))?;

    let refresh_token = data
        .refresh_token
        .filter(|t| !t.is_empty())
        .or(previous_refresh);

    Ok(TokenPair::from_ttl(data.access_token, ttl, refresh_token, now))
}

const LOGIN_FAILED: &str = "Login failed. Please check your connection and try again.";

/// Reduce a login failure to a message fit for the person logging in.
///
/// Only messages from a decoded Directus error body are passed through;
/// anything else (proxy pages, plain-text bodies) gets the generic message.
fn login_failure(err: DirectusError) -> AuthError {
    match err {
        DirectusError::Api(api) if api.is_unauthenticated() => {
            AuthError::Login("Invalid email or password.".to_string())
        }
        DirectusError::Api(api) if api.code.is_some() && !api.message.is_empty() => {
            AuthError::Login(api.message)
        }
        DirectusError::Parse(message) => AuthError::InvalidResponse(message),
        _ => AuthError::Login(LOGIN_FAILED.to_string()),
    }
}
