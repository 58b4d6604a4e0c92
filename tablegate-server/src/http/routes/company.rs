//! Company endpoints: create, rename, replace, delete

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{patch, post},
    Router,
};

use super::{create_row, delete_row, update_row};
use crate::http::error::ApiResult;
use crate::http::server::AppState;
use crate::models::{RequestInput, Rule, COMPANY, REQUIRED_TEXT};

const CREATE_RULES: &[Rule] = &[
    Rule::body("COMPANY_ID", REQUIRED_TEXT).with_message("COMPANY_ID is required"),
    Rule::body("COMPANY_NAME", REQUIRED_TEXT).with_message("COMPANY_NAME is required"),
    Rule::body("COMPANY_CITY", REQUIRED_TEXT).with_message("COMPANY_CITY is required"),
];

const RENAME_RULES: &[Rule] = &[
    Rule::param("COMPANY_ID", REQUIRED_TEXT),
    Rule::body("COMPANY_NAME", REQUIRED_TEXT),
];

const REPLACE_RULES: &[Rule] = &[
    Rule::param("COMPANY_ID", REQUIRED_TEXT),
    Rule::body("COMPANY_NAME", REQUIRED_TEXT),
    Rule::body("COMPANY_CITY", REQUIRED_TEXT),
];

const DELETE_RULES: &[Rule] = &[Rule::param("COMPANY_ID", REQUIRED_TEXT)];

/// POST /company
async fn create_company(
    State(state): State<Arc<AppState>>,
    input: RequestInput,
) -> ApiResult<StatusCode> {
    create_row(&state, &COMPANY, CREATE_RULES, input).await
}

/// PATCH /company/{COMPANY_ID} - change the name only
async fn rename_company(
    State(state): State<Arc<AppState>>,
    input: RequestInput,
) -> ApiResult<StatusCode> {
    update_row(&state, &COMPANY, RENAME_RULES, input).await
}

/// PUT /company/{COMPANY_ID} - replace name and city
async fn replace_company(
    State(state): State<Arc<AppState>>,
    input: RequestInput,
) -> ApiResult<StatusCode> {
    update_row(&state, &COMPANY, REPLACE_RULES, input).await
}

/// DELETE /company/{COMPANY_ID}
async fn delete_company(
    State(state): State<Arc<AppState>>,
    input: RequestInput,
) -> ApiResult<StatusCode> {
    delete_row(&state, &COMPANY, DELETE_RULES, input).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/company", post(create_company))
        .route(
            "/company/{COMPANY_ID}",
            patch(rename_company)
                .put(replace_company)
                .delete(delete_company),
        )
}
