//! Core types for Creators Corner.
//!
//! This module provides type-safe wrappers for the values that cross the
//! Directus boundary.

pub mod email;
pub mod id;
pub mod status;
pub mod token;

pub use email::{Email, EmailError};
pub use id::*;
pub use status::*;
pub use token::{AccessClaims, ClaimsError, TokenPair};
