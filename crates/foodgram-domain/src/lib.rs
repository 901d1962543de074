//! Domain types shared across Foodgram crates.
//!
//! Pure types and functions with no framework dependencies.

pub mod pagination;
pub mod relation;
pub mod user;
pub mod validate;
