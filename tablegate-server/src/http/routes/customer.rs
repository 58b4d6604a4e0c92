//! Customer endpoints. Only the name is writable.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::patch, Router};

use super::update_row;
use crate::http::error::ApiResult;
use crate::http::server::AppState;
use crate::models::{RequestInput, Rule, CUSTOMER, REQUIRED_TEXT};

const RENAME_RULES: &[Rule] = &[
    Rule::param("CUST_CODE", REQUIRED_TEXT),
    Rule::body("CUST_NAME", REQUIRED_TEXT),
];

/// PATCH /customer/{CUST_CODE}
async fn rename_customer(
    State(state): State<Arc<AppState>>,
    input: RequestInput,
) -> ApiResult<StatusCode> {
    update_row(&state, &CUSTOMER, RENAME_RULES, input).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/customer/{CUST_CODE}", patch(rename_customer))
}
