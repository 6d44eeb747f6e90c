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

use supplytrack_core::ContractId;
use supplytrack_infra::EntityStore;
use supplytrack_ledger::{NewSmartContract, SmartContractPatch};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route("/:id", get(get_contract).patch(update_contract))
}

pub async fn list_contracts(
    Extension(store): Extension<Arc<EntityStore>>,
    query: Result<Query<dto::ContractQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match query.into_filter().and_then(|f| store.list_contracts(f)) {
        Ok(contracts) => (StatusCode::OK, Json(contracts)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_contract(
    Extension(store): Extension<Arc<EntityStore>>,
    body: Result<Json<NewSmartContract>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.create_contract(body) {
        Ok(contract) => (StatusCode::CREATED, Json(contract)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_contract(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_contract(&ContractId::from(id)) {
        Ok(contract) => (StatusCode::OK, Json(contract)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_contract(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
    body: Result<Json<SmartContractPatch>, JsonRejection>,
) -> axum::response::Response {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.update_contract(&ContractId::from(id), patch) {
        Ok(contract) => (StatusCode::OK, Json(contract)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
