//! Subcommand implementations.
//!
//! Every command runs against one [`Session`]: the Directus client for
//! `DIRECTUS_URL`, persisting to `DIRECTUS_STORAGE_DIR`.

pub mod auth;
pub mod items;

use creators_corner_client::{
    AuthSession, ClientConfig, ConfigError, DirectusClient, DirectusError, FileStore,
};
use thiserror::Error;

/// The session type every command works with.
pub type Session = AuthSession<DirectusClient, FileStore>;

/// Errors that can occur while setting up a command.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Failed to create Directus client: {0}")]
    Client(#[from] DirectusError),
}

/// Load configuration and open the persisted session.
pub fn open_session() -> Result<Session, SetupError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(
        url = %config.directus_url,
        storage = %config.storage_dir.display(),
        "Opening session"
    );
    Ok(AuthSession::from_config(&config)?)
}
