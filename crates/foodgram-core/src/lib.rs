//! Cross-cutting plumbing shared by Foodgram services: configuration, health probes,
//! request ids, tracing setup, serde and sea-orm helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
