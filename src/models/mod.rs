//! Data models representing database entities and API payloads.

/// Customer entity, requests and views
pub mod customer;
/// Credit entity, requests and views
pub mod credit;
mod validation;
