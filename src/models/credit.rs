//! Credit data models and API request/response types.
//!
//! This module defines:
//! - `Credit`: Database entity representing a persisted credit
//! - `NewCredit`: A credit that has been requested but not yet stored
//! - `CreateCreditRequest`: Request body for creating credits
//! - `CreditView` / `CreditViewList`: Response bodies returned to clients

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{customer::Customer, validation},
};

/// Lifecycle state of a credit.
///
/// Every credit starts `InProgress`. The other states are part of the
/// stored enumeration but nothing here moves a credit into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "credit_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    #[default]
    InProgress,
    Approved,
    Rejected,
}

/// Represents a credit record from the database.
///
/// # Database Table
///
/// Maps to the `credits` table. Each credit belongs to exactly one customer
/// through `customer_id`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Credit {
    pub id: i64,

    /// External lookup key, unique across the store
    pub credit_code: Uuid,

    pub credit_value: Decimal,

    pub day_first_installment: NaiveDate,

    pub number_of_installments: i32,

    pub status: CreditStatus,

    /// Owner of this credit; always set, even when `customer` is not loaded.
    pub customer_id: i64,

    /// The owning customer, when it has been loaded alongside the credit.
    #[sqlx(skip)]
    pub customer: Option<Customer>,
}

impl Credit {
    /// Attach the resolved owner.
    pub fn with_customer(self, customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            ..self
        }
    }
}

/// A credit ready to be stored.
///
/// The credit code and initial status are fixed at construction; the owner
/// is only referenced by id until the service has confirmed it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredit {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: i64,
}

impl NewCredit {
    pub fn new(
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installments: i32,
        customer_id: i64,
    ) -> Self {
        Self {
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installments,
            status: CreditStatus::InProgress,
            customer_id,
        }
    }
}

/// Request body for creating a credit.
///
/// # JSON Example
///
/// ```json
/// {
///   "creditValue": 1000.0,
///   "dayFirstInstallment": "2026-11-01",
///   "numberOfInstallments": 1,
///   "customerId": 1
/// }
/// ```
///
/// # Validation
///
/// - `creditValue`: must be positive
/// - `dayFirstInstallment`: today or later
/// - `numberOfInstallments`: must be positive
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreateCreditRequest {
    /// Validate the request against `today` and build the credit to store.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when a value or the first installment date is out of range.
    pub fn into_new_credit(self, today: NaiveDate) -> Result<NewCredit, AppError> {
        validation::require_positive("creditValue", self.credit_value)?;

        if self.number_of_installments <= 0 {
            return Err(AppError::InvalidRequest(
                "numberOfInstallments must be positive".to_string(),
            ));
        }

        if self.day_first_installment < today {
            return Err(AppError::InvalidRequest(
                "dayFirstInstallment must be today or in the future".to_string(),
            ));
        }

        Ok(NewCredit::new(
            self.credit_value,
            self.day_first_installment,
            self.number_of_installments,
            self.customer_id,
        ))
    }
}

/// Query string carrying the caller's customer id (`?customerId=`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

/// Detailed response for a single credit.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "creditCode": "550e8400-e29b-41d4-a716-446655440000",
///   "creditValue": 1000.0,
///   "numberOfInstallments": 1,
///   "status": "IN_PROGRESS",
///   "emailCustomer": "ana@example.com",
///   "incomeCustomer": 5000.0
/// }
/// ```
///
/// `emailCustomer` and `incomeCustomer` are `null` when the owner was not loaded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub id: i64,
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub email_customer: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub income_customer: Option<Decimal>,
}

impl From<Credit> for CreditView {
    fn from(credit: Credit) -> Self {
        let (email_customer, income_customer) = match credit.customer {
            Some(customer) => (Some(customer.email), Some(customer.income)),
            None => (None, None),
        };

        Self {
            id: credit.id,
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer,
            income_customer,
        }
    }
}

/// Summary entry for `GET /api/credits?customerId=`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditViewList {
    pub credit_code: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditViewList {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}
