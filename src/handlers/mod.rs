//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, query string)
//! 2. Validates it and calls the matching service
//! 3. Returns HTTP response (JSON, status code)

/// Credit endpoints
pub mod credits;
/// Customer endpoints
pub mod customers;
/// Liveness endpoint
pub mod health;
