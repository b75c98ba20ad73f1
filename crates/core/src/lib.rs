//! Creators Corner Core - Shared types library.
//!
//! This crate provides the types shared by every Creators Corner component:
//! - `client` - Directus auth adapter (session, storage, REST client)
//! - `cli` - Command-line tool for logging in and browsing collections
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and emails, item statuses, and the
//!   session token pair
//! - [`schema`] - Typed descriptors of the Directus collections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod schema;
pub mod types;

pub use schema::*;
pub use types::*;
