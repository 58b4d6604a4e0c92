//! API error types with IntoResponse
//!
//! Every failure leaves the handler as one of these variants and is
//! rendered as `{"error": ...}` with a fixed status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::FieldError;

/// Message returned for every 500
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// One or more rules failed (400, lists every field)
    Validation(Vec<FieldError>),

    /// Write matched no row (400)
    InvalidId { message: &'static str },

    /// Database refused an insert (400, database message passed through)
    Rejected { message: String },

    /// Body was not JSON (400)
    MalformedBody { reason: String },

    /// Body exceeded the request size limit (413)
    PayloadTooLarge,

    /// No route matched (404)
    RouteNotFound,

    /// Path exists but not for this method (405)
    MethodNotAllowed,

    /// Connection or query failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Classify a failed insert: a refused statement is the client's
    /// problem, a missing connection is ours.
    pub fn from_insert(err: DbError) -> Self {
        match err {
            DbError::Rejected { message, code } => {
                tracing::warn!(code = ?code, "insert rejected: {}", message);
                Self::Rejected { message }
            }
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidId { .. }
            | Self::Rejected { .. }
            | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({
                "error": "Validation failed",
                "errors": errors,
            }),
            Self::InvalidId { message } => json!({ "error": message }),
            Self::Rejected { message } => json!({ "error": message }),
            Self::MalformedBody { reason } => json!({
                "error": format!("Malformed JSON body: {}", reason)
            }),
            Self::PayloadTooLarge => json!({ "error": "Request body too large" }),
            Self::RouteNotFound => json!({ "error": "Not found" }),
            Self::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                json!({ "error": INTERNAL_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    async fn body_of(err: ApiError) -> (StatusCode, JsonValue) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400_with_every_field() {
        let errors = vec![
            FieldError {
                kind: "field",
                value: None,
                msg: "COMPANY_ID is required",
                path: "COMPANY_ID",
                location: crate::models::Location::Body,
            };
            2
        ];
        let (status, body) = body_of(ApiError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn invalid_id_is_400() {
        let (status, body) = body_of(ApiError::InvalidId {
            message: "Invalid Customer code supplied",
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid Customer code supplied" }));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let err = ApiError::from(DbError::Connection(sqlx::Error::PoolTimedOut));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": INTERNAL_MESSAGE }));
    }

    #[test]
    fn insert_classification() {
        let rejected = ApiError::from_insert(DbError::Rejected {
            message: "Duplicate entry 'C1' for key 'PRIMARY'".into(),
            code: Some("23000".into()),
        });
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

        let down = ApiError::from_insert(DbError::Connection(sqlx::Error::PoolClosed));
        assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
