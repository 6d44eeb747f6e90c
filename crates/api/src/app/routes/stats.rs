use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use supplytrack_infra::EntityStore;

use crate::app::errors;

pub async fn get_stats(Extension(store): Extension<Arc<EntityStore>>) -> axum::response::Response {
    match store.statistics() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
