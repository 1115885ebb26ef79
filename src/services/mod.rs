//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They reach storage only through the repository traits.

pub mod credit_service;
pub mod customer_service;

pub use credit_service::CreditService;
pub use customer_service::CustomerService;
