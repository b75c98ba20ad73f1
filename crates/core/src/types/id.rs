//! Newtype IDs for type-safe item references.
//!
//! Directus collections created by the project use auto-increment integer
//! keys, while system collections (`directus_users`, `directus_files`,
//! `directus_roles`) use UUIDs. `define_id!` and `define_uuid_id!` cover the
//! two cases and keep ids from different collections from being mixed up.

/// Macro to define a type-safe integer ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `get()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use creators_corner_core::define_id;
/// define_id!(PostId);
/// define_id!(CommentId);
///
/// let post_id = PostId::new(1);
/// let comment_id = CommentId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: PostId = comment_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its primary key value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying primary key value.
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a type-safe UUID wrapper for Directus system collections.
///
/// Same shape as [`define_id!`], wrapping [`uuid::Uuid`] instead of `i64`,
/// and parseable from its hyphenated string form.
#[macro_export]
macro_rules! define_uuid_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

// System collections
define_uuid_id!(UserId);
define_uuid_id!(RoleId);
define_uuid_id!(FileId);

// Project collections
define_id!(CreatorId);
define_id!(WorkId);
define_id!(CategoryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_id_serde_is_transparent() {
        let id = WorkId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: WorkId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
        assert_eq!(i64::from(parsed), 42);
    }

    #[test]
    fn test_uuid_id_parses_and_displays() {
        let raw = "0f8b3a4e-6a2c-4f59-9d7e-8c1e2b3a4d5f";
        let id: UserId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{raw}\""));
    }

    #[test]
    fn test_uuid_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<FileId>().is_err());
    }
}
