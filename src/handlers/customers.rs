//! Customer HTTP handlers.
//!
//! This module implements the customer endpoints:
//! - POST /api/customers - Register a customer
//! - GET /api/customers/{id} - Get customer by id
//! - PATCH /api/customers?customerId= - Update a customer
//! - DELETE /api/customers/{id} - Delete a customer and its credits

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    models::{
        credit::CustomerIdQuery,
        customer::{CreateCustomerRequest, CustomerView, UpdateCustomerRequest},
    },
    state::AppState,
};

/// Register a new customer.
///
/// # Response
///
/// - **Success (201 Created)**: Returns the stored customer
/// - **Error (400)**: Validation failed
/// - **Error (409)**: cpf or email already registered
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerView>), AppError> {
    let customer = state.customers.save(request.into_customer()?).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Get a customer by id.
///
/// # Response
///
/// - **Success (200 OK)**: Returns the customer
/// - **Error (404)**: "Id {id} not found"
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<CustomerView>, AppError> {
    let customer = state.customers.find_by_id(customer_id).await?;

    Ok(Json(customer.into()))
}

/// Update the mutable fields of a customer.
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Ana",
///   "lastName": "Souza",
///   "income": 7000.0,
///   "zipCode": "12345",
///   "street": "Rua Nova"
/// }
/// ```
pub async fn update_customer(
    State(state): State<AppState>,
    Query(query): Query<CustomerIdQuery>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerView>, AppError> {
    let customer = state
        .customers
        .update(query.customer_id, request.into_update()?)
        .await?;

    Ok(Json(customer.into()))
}

/// Delete a customer.
///
/// Returns 204 No Content on success, 404 when the id is unknown.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.customers.delete(customer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
