use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use supplytrack_core::TransactionId;
use supplytrack_infra::EntityStore;
use supplytrack_ledger::NewTransaction;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/:id", get(get_transaction))
}

pub async fn list_transactions(
    Extension(store): Extension<Arc<EntityStore>>,
    query: Result<Query<dto::TransactionQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match query.into_filter().and_then(|f| store.list_transactions(f)) {
        Ok(txs) => (StatusCode::OK, Json(txs)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_transaction(
    Extension(store): Extension<Arc<EntityStore>>,
    body: Result<Json<NewTransaction>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.create_transaction(body) {
        Ok(tx) => (StatusCode::CREATED, Json(tx)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_transaction(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_transaction(&TransactionId::from(id)) {
        Ok(tx) => (StatusCode::OK, Json(tx)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
