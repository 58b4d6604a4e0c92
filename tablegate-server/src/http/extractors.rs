//! Custom Axum extractors

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use serde_json::Value as JsonValue;

use super::error::ApiError;
use crate::models::RequestInput;

/// Collects path parameters and the JSON body without judging them.
///
/// Missing or empty bodies become `{}` so the validator reports each
/// missing field; only bodies that are not JSON at all are rejected here.
impl<S> FromRequest<S> for RequestInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without placeholders have no params to extract
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
                _ => ApiError::MalformedBody {
                    reason: e.body_text(),
                },
            })?;

        Ok(Self::new(params, parse_body(&bytes)?))
    }
}

fn parse_body(bytes: &[u8]) -> Result<JsonValue, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody {
        reason: e.to_string(),
    })
}
