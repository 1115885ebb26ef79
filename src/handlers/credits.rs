//! Credit HTTP handlers.
//!
//! This module implements the credit endpoints:
//! - POST /api/credits - Create a credit for a customer
//! - GET /api/credits?customerId= - List a customer's credits
//! - GET /api/credits/{creditCode}?customerId= - Get one credit, owner only

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Local;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::credit::{CreateCreditRequest, CreditView, CreditViewList, CustomerIdQuery},
    state::AppState,
};

/// Create a credit.
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: Returns the credit with the owner's email and income
/// - **Error (400)**: Validation failed
/// - **Error (404)**: Customer does not exist
pub async fn create_credit(
    State(state): State<AppState>,
    Json(request): Json<CreateCreditRequest>,
) -> Result<(StatusCode, Json<CreditView>), AppError> {
    let credit = request.into_new_credit(Local::now().date_naive())?;
    let credit = state.credits.save(credit).await?;

    Ok((StatusCode::CREATED, Json(credit.into())))
}

/// List all credits of a customer.
///
/// An unknown customer id yields an empty array, not an error.
pub async fn list_credits(
    State(state): State<AppState>,
    Query(query): Query<CustomerIdQuery>,
) -> Result<Json<Vec<CreditViewList>>, AppError> {
    let credits = state.credits.find_all_by_customer(query.customer_id).await?;

    let responses: Vec<CreditViewList> = credits.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// Get a credit by its code.
///
/// # Response
///
/// - **Success (200 OK)**: The credit belongs to `customerId`
/// - **Error (404)**: No credit has this code
/// - **Error (403)**: The credit belongs to another customer
pub async fn get_credit(
    State(state): State<AppState>,
    Path(credit_code): Path<Uuid>,
    Query(query): Query<CustomerIdQuery>,
) -> Result<Json<CreditView>, AppError> {
    let credit = state
        .credits
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;

    Ok(Json(credit.into()))
}
