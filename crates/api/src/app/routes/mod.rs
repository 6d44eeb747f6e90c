use axum::{routing::get, Router};

pub mod contracts;
pub mod inventory;
pub mod stats;
pub mod system;
pub mod transactions;
pub mod transfers;
pub mod users;

/// Router for every entity endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/stats", get(stats::get_stats))
        .nest("/inventory", inventory::router())
        .nest("/transfers", transfers::router())
        .nest("/transactions", transactions::router())
        .nest("/contracts", contracts::router())
        .nest("/users", users::router())
}
