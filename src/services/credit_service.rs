//! Credit service - creation and ownership-checked lookup of credits.
//!
//! # Invariants
//!
//! - A credit is only stored after its customer id has been resolved through
//!   `CustomerService::find_by_id`; a dangling id never reaches the store.
//! - `find_by_credit_code` distinguishes a missing code (`NotFound`) from a
//!   code owned by another customer (`AccessDenied`).
//! - `find_all_by_customer` does not check that the customer exists; an
//!   unknown id simply has no credits.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppError,
    models::credit::{Credit, NewCredit},
    repositories::CreditRepository,
    services::customer_service::CustomerService,
};

#[derive(Clone)]
pub struct CreditService {
    repository: Arc<dyn CreditRepository>,
    customer_service: CustomerService,
}

impl CreditService {
    pub fn new(repository: Arc<dyn CreditRepository>, customer_service: CustomerService) -> Self {
        Self {
            repository,
            customer_service,
        }
    }

    /// Store a new credit for an existing customer.
    ///
    /// # Process
    ///
    /// 1. Resolve the owner by `credit.customer_id`
    /// 2. Insert the credit
    /// 3. Return the stored credit with the resolved owner attached
    ///
    /// # Errors
    ///
    /// - `NotFound`: the customer does not exist (nothing is stored)
    /// - `Conflict`: the credit code is already taken
    /// - `Database`: Database error occurred
    pub async fn save(&self, credit: NewCredit) -> Result<Credit, AppError> {
        let customer = self.customer_service.find_by_id(credit.customer_id).await?;

        let stored = self.repository.save(&credit).await?;
        tracing::info!(
            credit_id = stored.id,
            credit_code = %stored.credit_code,
            customer_id = stored.customer_id,
            "credit created"
        );

        Ok(stored.with_customer(customer))
    }

    /// List a customer's credits in insertion order.
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        self.repository.find_all_by_customer_id(customer_id).await
    }

    /// Fetch one credit by its code on behalf of `customer_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound`: "CreditCode {credit_code} not found"
    /// - `AccessDenied`: "Contact admin" when the credit belongs to someone else
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<Credit, AppError> {
        let credit = self
            .repository
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("CreditCode {credit_code} not found")))?;

        if credit.customer_id != customer_id {
            tracing::warn!(
                %credit_code,
                requested_by = customer_id,
                owner = credit.customer_id,
                "credit lookup by non-owner"
            );
            return Err(AppError::AccessDenied("Contact admin".to_string()));
        }

        Ok(credit)
    }
}
