//! Auth types shared across Foodgram crates.
//!
//! Token issuance lives in the gateway; services only read the identity it injects.

pub mod identity;
