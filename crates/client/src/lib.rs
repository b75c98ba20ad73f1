//! Creators Corner Client - Directus auth adapter.
//!
//! Everything the app needs to sign people in against Directus and read
//! content on their behalf:
//!
//! - [`AuthSession`] - login, logout, current user, token refresh
//! - [`DirectusClient`] - the REST calls behind the session ([`AuthApi`])
//! - [`TokenStore`] - the persisted token pair, over a [`KeyValueStore`]
//! - [`ClientConfig`] - environment-driven settings
//!
//! # Example
//!
//! ```rust,ignore
//! use creators_corner_client::{AuthSession, ClientConfig, Query};
//! use creators_corner_core::Work;
//!
//! let config = ClientConfig::from_env()?;
//! let session = AuthSession::from_config(&config)?;
//!
//! let works: Vec<Work> = session.read_items(&Query::new().limit(20)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod config;
pub mod directus;
pub mod error;
pub mod session;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, ConfigError};
pub use directus::{ApiError, AuthApi, AuthData, DirectusClient, DirectusError, Query};
pub use error::AuthError;
pub use session::AuthSession;
pub use storage::{
    AUTH_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore, StorageError, TokenStore,
};
