//! Directus REST client.
//!
//! [`AuthApi`] is the set of backend calls the session needs.
//! [`DirectusClient`] implements it over HTTP with `reqwest`; tests can
//! substitute their own implementation.
//!
//! # Endpoints
//!
//! - `POST /auth/login` - exchange email and password for tokens
//! - `POST /auth/refresh` - exchange a refresh token for new tokens
//! - `POST /auth/logout` - invalidate a refresh token
//! - `GET /users/me` - the authenticated user
//! - `GET /items/{collection}`, `GET /users`, `GET /files` - collection reads
//!
//! # Example
//!
//! ```rust,ignore
//! use creators_corner_client::{ClientConfig, DirectusClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = DirectusClient::new(&config)?;
//! let tokens = client.login(&email, &password).await?;
//! let me = client.current_user(&tokens.access_token, UserProfile::PROFILE_FIELDS).await?;
//! ```

mod error;
mod query;
mod types;

pub use error::{ApiError, DirectusError};
pub use query::Query;
pub use types::AuthData;

use std::future::Future;
use std::sync::Arc;

use creators_corner_core::{Collection, Email, UserProfile};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::config::ClientConfig;

use types::{DataEnvelope, LoginRequest, LogoutRequest, MODE_JSON, RefreshRequest};

const USER_AGENT: &str = concat!("creators-corner/", env!("CARGO_PKG_VERSION"));

/// Backend calls the auth session depends on.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for tokens.
    fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<AuthData, DirectusError>> + Send;

    /// Exchange a refresh token for new tokens.
    fn refresh(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<AuthData, DirectusError>> + Send;

    /// Invalidate the server-side session bound to `refresh_token`.
    fn logout(&self, refresh_token: &str) -> impl Future<Output = Result<(), DirectusError>> + Send;

    /// Read the authenticated user's profile.
    fn current_user(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> impl Future<Output = Result<UserProfile, DirectusError>> + Send;

    /// Read items of collection `C`, anonymously when `access_token` is `None`.
    fn read_items<C: Collection>(
        &self,
        access_token: Option<&str>,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<C>, DirectusError>> + Send;
}

/// HTTP client for a Directus instance.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct DirectusClient {
    inner: Arc<DirectusClientInner>,
}

struct DirectusClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl DirectusClient {
    /// Create a client for the instance in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, DirectusError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(DirectusClientInner {
                client,
                base_url: config.directus_url.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DirectusError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Unwrap the `data` envelope of a successful response.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DirectusError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let envelope: DataEnvelope<T> = serde_json::from_str(&body)
                .map_err(|e| DirectusError::Parse(format!("Failed to parse response: {e}")))?;
            Ok(envelope.data)
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Turn an error status into an [`ApiError`].
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> DirectusError {
        match response.text().await {
            Ok(body) => DirectusError::Api(ApiError::from_body(status, &body)),
            Err(e) => DirectusError::Http(e),
        }
    }
}

impl AuthApi for DirectusClient {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &Email, password: &SecretString) -> Result<AuthData, DirectusError> {
        let url = self.endpoint("auth/login")?;
        let request = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
            mode: MODE_JSON,
        };

        let response = self.inner.client.post(url).json(&request).send().await?;
        Self::handle_response(response).await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<AuthData, DirectusError> {
        let url = self.endpoint("auth/refresh")?;
        let request = RefreshRequest {
            refresh_token,
            mode: MODE_JSON,
        };

        let response = self.inner.client.post(url).json(&request).send().await?;
        Self::handle_response(response).await
    }

    #[instrument(skip_all)]
    async fn logout(&self, refresh_token: &str) -> Result<(), DirectusError> {
        let url = self.endpoint("auth/logout")?;
        let request = LogoutRequest {
            refresh_token,
            mode: MODE_JSON,
        };

        let response = self.inner.client.post(url).json(&request).send().await?;
        let status = response.status();

        // 204 No Content on success; there is no envelope to unwrap
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    #[instrument(skip(self, access_token))]
    async fn current_user(
        &self,
        access_token: &str,
        fields: &[&str],
    ) -> Result<UserProfile, DirectusError> {
        let mut url = self.endpoint("users/me")?;
        if !fields.is_empty() {
            url.query_pairs_mut().append_pair("fields", &fields.join(","));
        }

        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    #[instrument(skip(self, access_token, query), fields(collection = C::NAME))]
    async fn read_items<C: Collection>(
        &self,
        access_token: Option<&str>,
        query: &Query,
    ) -> Result<Vec<C>, DirectusError> {
        let mut url = self.endpoint(C::ENDPOINT)?;
        query.apply(&mut url, C::DEFAULT_FIELDS);

        let mut request = self.inner.client.get(url);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }
}
