//! The `directus_users` system collection.

use serde::{Deserialize, Serialize};

use super::{Collection, Extra};
use crate::types::{FileId, RoleId, UserId, UserStatus};

/// Profile of a Directus user, as returned by `/users/me` and `/users`.
///
/// Read-only snapshot; re-fetch it rather than caching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image in `directus_files`.
    #[serde(default)]
    pub avatar: Option<FileId>,
    #[serde(default)]
    pub role: Option<RoleId>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    /// Any other field the backend returned.
    #[serde(flatten)]
    pub extra: Extra,
}

impl UserProfile {
    /// Fields requested for the current-user lookup.
    pub const PROFILE_FIELDS: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "avatar", "role"];

    /// The user's display name, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone().unwrap_or_default(),
        }
    }
}

impl Collection for UserProfile {
    const NAME: &'static str = "directus_users";
    const ENDPOINT: &'static str = "users";
    const DEFAULT_FIELDS: &'static [&'static str] = Self::PROFILE_FIELDS;
}
