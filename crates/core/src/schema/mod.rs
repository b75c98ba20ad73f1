//! Typed descriptors of the Directus collections Creators Corner reads.
//!
//! Each collection type implements [`Collection`], which names the REST
//! endpoint it lives under and the fields requested by default. Fields the
//! backend adds beyond the known ones are kept in an explicit `extra` map
//! instead of being dropped.

mod content;
mod files;
mod users;

pub use content::{Category, Creator, Work};
pub use files::DirectusFile;
pub use users::UserProfile;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

/// Backend-defined fields not modelled by a schema type.
pub type Extra = BTreeMap<String, serde_json::Value>;

/// A Directus collection that can be read as typed items.
pub trait Collection: DeserializeOwned + Send + 'static {
    /// Collection name as configured in Directus.
    const NAME: &'static str;

    /// Path of the collection endpoint relative to the API root.
    ///
    /// `items/<name>` for project collections; system collections have
    /// dedicated endpoints (`users`, `files`).
    const ENDPOINT: &'static str;

    /// Fields requested when the caller does not pick any.
    const DEFAULT_FIELDS: &'static [&'static str] = &["*"];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint<C: Collection>() -> (&'static str, &'static str) {
        (C::NAME, C::ENDPOINT)
    }

    #[test]
    fn test_collection_endpoints() {
        assert_eq!(endpoint::<Creator>(), ("creators", "items/creators"));
        assert_eq!(endpoint::<Work>(), ("works", "items/works"));
        assert_eq!(endpoint::<Category>(), ("categories", "items/categories"));
        assert_eq!(endpoint::<DirectusFile>(), ("directus_files", "files"));
        assert_eq!(endpoint::<UserProfile>(), ("directus_users", "users"));
    }
}
