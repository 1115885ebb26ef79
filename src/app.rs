//! HTTP router assembly.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Customer routes
        .route(
            "/api/customers",
            post(handlers::customers::create_customer).patch(handlers::customers::update_customer),
        )
        .route(
            "/api/customers/{id}",
            get(handlers::customers::get_customer).delete(handlers::customers::delete_customer),
        )
        // Credit routes
        .route(
            "/api/credits",
            post(handlers::credits::create_credit).get(handlers::credits::list_credits),
        )
        .route(
            "/api/credits/{credit_code}",
            get(handlers::credits::get_credit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
