use std::error::Error as StdError;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use supplytrack_core::{DomainError, FieldViolation};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(fields) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": message,
                "fields": fields,
            })),
        )
            .into_response(),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::InsufficientQuantity { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_quantity", message)
        }
        DomainError::InvalidTransition { .. } => {
            json_error(StatusCode::CONFLICT, "invalid_transition", message)
        }
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
        DomainError::InvariantViolation(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", message)
        }
        DomainError::Unavailable(_) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
        }
    }
}

/// Body failures are reported as a validation error naming the offending
/// field. Type mismatches, unknown variants and unknown keys carry their JSON
/// path; syntax errors and a missing content type are attributed to `body`.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    let violation = match &rejection {
        JsonRejection::JsonDataError(_) => data_error_violation(&rejection),
        _ => None,
    }
    .unwrap_or_else(|| FieldViolation::new("body", rejection.body_text()));

    domain_error_to_response(DomainError::Validation(vec![violation]))
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    domain_error_to_response(DomainError::Validation(vec![FieldViolation::new(
        "query",
        rejection.body_text(),
    )]))
}

/// Find the path-tracking serde error axum wraps inside a data rejection.
fn data_error_violation(rejection: &JsonRejection) -> Option<FieldViolation> {
    let mut source: Option<&(dyn StdError + 'static)> = Some(rejection);
    while let Some(err) = source {
        if let Some(err) = err.downcast_ref::<serde_path_to_error::Error<serde_json::Error>>() {
            let path = err.path().to_string();
            let field = if path == "." { "body".to_string() } else { path };
            return Some(FieldViolation::new(field, err.inner().to_string()));
        }
        source = err.source();
    }
    None
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
