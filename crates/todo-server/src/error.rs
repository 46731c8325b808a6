//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use todo_core::TodoError;

pub const NOT_FOUND_DETAIL: &str = "Item not found :(";

/// Error body returned by every handler: `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        ApiError(e)
    }
}

// Malformed bodies, paths and query strings are all caller input errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(TodoError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(TodoError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(TodoError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            TodoError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            TodoError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string()),
            TodoError::Storage(msg) => {
                tracing::error!("Store fault: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
