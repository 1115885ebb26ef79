//! Customer service - registration, lookup, update and removal of customers.
//!
//! `find_by_id` is the single answer to "does this customer exist"; every
//! other operation here, and credit creation, goes through it.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::customer::{Customer, CustomerUpdate},
    repositories::CustomerRepository,
};

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Persist a customer and return the stored record.
    ///
    /// The store assigns the id on first insert.
    ///
    /// # Errors
    ///
    /// - `Conflict`: cpf or email already registered
    /// - `Database`: Database error occurred
    pub async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        let customer = self.repository.save(customer).await?;
        tracing::info!(customer_id = ?customer.id, "customer saved");
        Ok(customer)
    }

    /// Fetch a customer by id.
    ///
    /// # Errors
    ///
    /// - `NotFound`: "Id {id} not found"
    pub async fn find_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Id {id} not found")))
    }

    /// Apply `changes` to an existing customer and store the result.
    pub async fn update(&self, id: i64, changes: CustomerUpdate) -> Result<Customer, AppError> {
        let customer = self.find_by_id(id).await?;
        let customer = self.repository.save(customer.with_update(changes)).await?;
        tracing::info!(customer_id = id, "customer updated");
        Ok(customer)
    }

    /// Remove a customer.
    ///
    /// The existence check runs first, so an unknown id fails with
    /// `NotFound` and nothing is deleted. Dependent credits are removed by the
    /// store's cascade.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let customer = self.find_by_id(id).await?;
        self.repository.delete(&customer).await?;
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
