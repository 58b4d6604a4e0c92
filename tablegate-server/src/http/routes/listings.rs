//! Read-only list endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::list_rows;
use crate::db::Row;
use crate::http::error::ApiResult;
use crate::http::server::AppState;
use crate::models::{AGENTS, COMPANY, CUSTOMER};

/// GET /agents
async fn list_agents(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    list_rows(&state, &AGENTS).await
}

/// GET /companies
async fn list_companies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    list_rows(&state, &COMPANY).await
}

/// GET /customers
async fn list_customers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Row>>> {
    list_rows(&state, &CUSTOMER).await
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/agents", get(list_agents))
        .route("/companies", get(list_companies))
        .route("/customers", get(list_customers))
}
