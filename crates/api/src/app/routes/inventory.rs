use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use supplytrack_core::ItemId;
use supplytrack_infra::EntityStore;
use supplytrack_inventory::{InventoryItemPatch, NewInventoryItem};

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).patch(update_item))
}

pub async fn list_items(Extension(store): Extension<Arc<EntityStore>>) -> axum::response::Response {
    match store.list_inventory_items() {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(store): Extension<Arc<EntityStore>>,
    body: Result<Json<NewInventoryItem>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.create_inventory_item(body) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_inventory_item(&ItemId::from(id)) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
    body: Result<Json<InventoryItemPatch>, JsonRejection>,
) -> axum::response::Response {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.update_inventory_item(&ItemId::from(id), patch) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
