use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use supplytrack_core::TransferId;
use supplytrack_infra::EntityStore;
use supplytrack_transfers::NewTransfer;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route("/:id", get(get_transfer))
        .route("/:id/status", patch(set_status))
}

pub async fn list_transfers(
    Extension(store): Extension<Arc<EntityStore>>,
    query: Result<Query<dto::TransferQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let result = query
        .into_filter()
        .and_then(|filter| store.list_transfers(filter));
    match result {
        Ok(transfers) => (StatusCode::OK, Json(transfers)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_transfer(
    Extension(store): Extension<Arc<EntityStore>>,
    body: Result<Json<NewTransfer>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.create_transfer(body) {
        Ok(transfer) => (StatusCode::CREATED, Json(transfer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_transfer(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_transfer(&TransferId::from(id)) {
        Ok(transfer) => (StatusCode::OK, Json(transfer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Move a transfer through its lifecycle. Completing reconciles stock.
pub async fn set_status(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SetTransferStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let result = body
        .parse_status()
        .and_then(|status| store.set_transfer_status(&TransferId::from(id), status));
    match result {
        Ok(transfer) => (StatusCode::OK, Json(transfer)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
