//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! cc-cli login -e maker@example.com -p hunter2
//! cc-cli whoami
//! cc-cli status
//! cc-cli refresh
//! cc-cli logout
//! ```

use creators_corner_client::AuthError;
use creators_corner_core::TokenPair;
use secrecy::SecretString;

use super::Session;

/// Log in and report when the session expires.
pub async fn login(session: &Session, email: &str, password: String) -> Result<(), AuthError> {
    let password = SecretString::from(password);
    let pair = session.login(email, &password).await?;

    tracing::info!("Logged in as {email}");
    tracing::info!("Access token valid until {}", format_expiry(&pair));
    Ok(())
}

/// Log out. Succeeds even when the server could not be told.
pub async fn logout(session: &Session) -> Result<(), AuthError> {
    session.logout().await?;
    tracing::info!("Session cleared");
    Ok(())
}

/// Show the logged-in user.
pub async fn whoami(session: &Session) -> Result<(), AuthError> {
    match session.get_current_user().await? {
        Some(user) => {
            tracing::info!("User:  {}", user.display_name());
            tracing::info!("ID:    {}", user.id);
            if let Some(email) = &user.email {
                tracing::info!("Email: {email}");
            }
            if let Some(role) = &user.role {
                tracing::info!("Role:  {role}");
            }
        }
        None => tracing::info!("Not logged in. Run `cc-cli login` first."),
    }
    Ok(())
}

/// Show the stored session. Makes no network requests.
pub fn status(session: &Session) {
    let Some(pair) = session.auth_state() else {
        tracing::info!("No session stored");
        return;
    };

    let state = if session.is_token_expired() {
        "expired"
    } else {
        "active"
    };
    tracing::info!("Session {state}, access token expires {}", format_expiry(&pair));
    tracing::info!(
        "Refresh token: {}",
        if pair.can_refresh() { "present" } else { "absent" }
    );

    match pair.claims() {
        Ok(claims) => {
            tracing::info!("User ID: {}", claims.id);
            tracing::info!("Admin access: {}", claims.admin_access);
        }
        Err(e) => tracing::debug!("Access token claims unavailable: {e}"),
    }
}

/// Exchange the refresh token for a new pair.
pub async fn refresh(session: &Session) -> Result<(), AuthError> {
    match session.refresh().await {
        Ok(pair) => {
            tracing::info!("Session refreshed, valid until {}", format_expiry(&pair));
            Ok(())
        }
        Err(AuthError::NotAuthenticated) => {
            tracing::info!("Nothing to refresh. Run `cc-cli login` first.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn format_expiry(pair: &TokenPair) -> String {
    pair.expires_at().map_or_else(
        || format!("{} (epoch ms)", pair.expires),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
