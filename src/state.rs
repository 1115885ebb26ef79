//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    db::DbPool,
    repositories::{PgCreditRepository, PgCustomerRepository},
    services::{CreditService, CustomerService},
};

/// Services handed to every handler through axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub credits: CreditService,
}

impl AppState {
    pub fn new(customers: CustomerService, credits: CreditService) -> Self {
        Self { customers, credits }
    }

    /// Wire the Postgres repositories into both services.
    pub fn from_pool(pool: DbPool) -> Self {
        let customers = CustomerService::new(Arc::new(PgCustomerRepository::new(pool.clone())));
        let credits = CreditService::new(
            Arc::new(PgCreditRepository::new(pool)),
            customers.clone(),
        );
        Self::new(customers, credits)
    }
}
