// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};

pub use state::AppState;

use handlers::{categories, facilities, fees, groups, health};

/// Builds the application router without transport layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/categories/:category", get(categories::get_category))
        .route("/api/fees/quote", post(fees::quote_fee))
        .route(
            "/api/groups",
            post(groups::create_group).get(groups::list_my_groups),
        )
        .route("/api/groups/:id", get(groups::get_group))
        .route(
            "/api/facilities/business-number/verify",
            post(facilities::verify_business_number),
        )
        .with_state(state)
}
