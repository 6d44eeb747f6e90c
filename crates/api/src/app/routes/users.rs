use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use supplytrack_core::UserId;
use supplytrack_infra::EntityStore;
use supplytrack_parties::NewUser;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user))
}

pub async fn list_users(Extension(store): Extension<Arc<EntityStore>>) -> axum::response::Response {
    match store.list_users() {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_user(
    Extension(store): Extension<Arc<EntityStore>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match store.create_user(body) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(store): Extension<Arc<EntityStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match store.get_user(&UserId::from(id)) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
