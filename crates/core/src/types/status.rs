//! Status enums for Directus items and accounts.

use serde::{Deserialize, Serialize};

/// Publication status of a content item (creators, works, categories).
///
/// Mirrors the `status` field Directus scaffolds for new collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

impl ItemStatus {
    /// Whether the item is visible to anonymous readers.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Status of a `directus_users` account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Invited,
    Draft,
    Suspended,
    Archived,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Invited => write!(f, "invited"),
            Self::Draft => write!(f, "draft"),
            Self::Suspended => write!(f, "suspended"),
            Self::Archived => write!(f, "archived"),
        }
    }
}
