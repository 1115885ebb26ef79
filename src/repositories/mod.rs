//! Storage seams for customers and credits.
//!
//! Services only see these traits. `postgres` provides the production
//! implementations; `memory` backs the unit and HTTP tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::Customer,
    },
};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::{PgCreditRepository, PgCustomerRepository};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert the customer when it has no id, otherwise overwrite the stored row.
    async fn save(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    async fn delete(&self, customer: &Customer) -> Result<(), AppError>;
}

#[async_trait]
pub trait CreditRepository: Send + Sync {
    async fn save(&self, credit: &NewCredit) -> Result<Credit, AppError>;

    /// All credits of one customer in insertion order.
    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError>;
}
