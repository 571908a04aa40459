use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::YatraError;

/// Handler error rendered as `{ "error": kind, "message": text }`
#[derive(Debug)]
pub struct ApiError(pub YatraError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            YatraError::Validation { .. } => StatusCode::BAD_REQUEST,
            YatraError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            YatraError::NotFound { .. } => StatusCode::NOT_FOUND,
            YatraError::Config { .. }
            | YatraError::Catalog { .. }
            | YatraError::Store { .. }
            | YatraError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<YatraError> for ApiError {
    fn from(err: YatraError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(YatraError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(YatraError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        let body = json!({
            "error": self.0.kind(),
            "message": self.0.user_message(),
        });
        (status, Json(body)).into_response()
    }
}
