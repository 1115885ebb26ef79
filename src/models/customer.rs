//! Customer data models and API request/response types.
//!
//! This module defines:
//! - `Customer`: Database entity with its embedded `Address`
//! - `CustomerUpdate`: The fields a customer may change after registration
//! - `CreateCustomerRequest` / `UpdateCustomerRequest`: Request bodies
//! - `CustomerView`: Response body returned to clients

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::validation};

/// Postal address embedded in a customer row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. `cpf` and `email` are unique at the store
/// level; a duplicate surfaces as `AppError::Conflict` on save.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Customer {
    /// Assigned by the store on first save, `None` before that.
    pub id: Option<i64>,

    pub first_name: String,

    pub last_name: String,

    /// Brazilian tax id (11 digits)
    pub cpf: String,

    pub email: String,

    /// Stored as received.
    pub password: String,

    /// Monthly income
    pub income: Decimal,

    #[sqlx(flatten)]
    pub address: Address,
}

impl Customer {
    /// Return this customer with the updatable fields replaced.
    ///
    /// Identity, cpf, email and password are left untouched.
    pub fn with_update(self, update: CustomerUpdate) -> Self {
        Self {
            first_name: update.first_name,
            last_name: update.last_name,
            income: update.income,
            address: Address {
                zip_code: update.zip_code,
                street: update.street,
            },
            ..self
        }
    }
}

/// The subset of customer fields that can change after registration.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

/// Request body for registering a customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "firstName": "Ana",
///   "lastName": "Souza",
///   "cpf": "28475934625",
///   "income": 5000.0,
///   "email": "ana@example.com",
///   "password": "1234",
///   "zipCode": "000000",
///   "street": "Rua Floriano Peixoto"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub income: Decimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl CreateCustomerRequest {
    /// Validate the request and turn it into an unsaved customer.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` naming the first field that fails its check.
    pub fn into_customer(self) -> Result<Customer, AppError> {
        validation::require_non_blank("firstName", &self.first_name)?;
        validation::require_non_blank("lastName", &self.last_name)?;
        let cpf = validation::normalize_cpf(&self.cpf)?;
        validation::require_non_negative("income", self.income)?;
        validation::require_email(&self.email)?;
        validation::require_non_blank("password", &self.password)?;
        validation::require_non_blank("zipCode", &self.zip_code)?;
        validation::require_non_blank("street", &self.street)?;

        Ok(Customer {
            id: None,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf,
            email: self.email.trim().to_string(),
            password: self.password,
            income: self.income,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
        })
    }
}

/// Request body for `PATCH /api/customers?customerId=`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl UpdateCustomerRequest {
    pub fn into_update(self) -> Result<CustomerUpdate, AppError> {
        validation::require_non_blank("firstName", &self.first_name)?;
        validation::require_non_blank("lastName", &self.last_name)?;
        validation::require_non_negative("income", self.income)?;
        validation::require_non_blank("zipCode", &self.zip_code)?;
        validation::require_non_blank("street", &self.street)?;

        Ok(CustomerUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            income: self.income,
            zip_code: self.zip_code,
            street: self.street,
        })
    }
}

/// Response body for customer endpoints.
///
/// The password never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}
