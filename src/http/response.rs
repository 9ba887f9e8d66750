//! Response envelope and handler error mapping.
//!
//! # Responsibilities
//! - Define the `{"Status", "Error"}` envelope written on every failure
//! - Join field validation failures into one message
//! - Map each failure class to its HTTP status code

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::model::FieldError;
use crate::storage::StorageError;

pub const STATUS_ERROR: &str = "Error";

/// Uniform JSON envelope carrying a status and an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    pub status: &'static str,
    pub error: String,
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            error: message.into(),
        }
    }
}

/// Render validation failures as `field X is required field, field Y is invalid`.
pub fn validation_message(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every way a handler can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("empty body")]
    EmptyBody,

    #[error("{0}")]
    MalformedBody(String),

    #[error("{}", validation_message(.0))]
    Validation(Vec<FieldError>),

    #[error("invalid id {value:?}: {reason}")]
    InvalidId { value: String, reason: String },

    #[error("id should be non zero")]
    ZeroId,

    #[error("no student found with id {0}")]
    NotFound(i64),

    /// Storage failure reported to the client as a bad request.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Internal(String),

    #[error("request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::MalformedBody(_)
            | ApiError::Validation(_)
            | ApiError::InvalidId { .. }
            | ApiError::ZeroId
            | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(Envelope::error(self.to_string()))).into_response()
    }
}

/// Replace the timeout layer's bare 408 with the error envelope.
///
/// Handlers never answer 408 themselves, so the status alone identifies a
/// request cut off by the timeout.
pub async fn envelope_timeouts(request: Request<Body>, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentPayload;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(Envelope::error("empty body")).unwrap();
        assert_eq!(value, serde_json::json!({"Status": "Error", "Error": "empty body"}));
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let errors = StudentPayload::default().validate().unwrap_err();
        assert_eq!(
            ApiError::from(errors).to_string(),
            "field Name is required field, field Email is required field, field Age is required field"
        );
    }

    #[test]
    fn test_storage_error_mapping() {
        assert_eq!(
            ApiError::from(StorageError::NotFound(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StorageError::backend("list students", "disk I/O error")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(ApiError::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::ZeroId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ApiError::Rejected("constraint failed".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
