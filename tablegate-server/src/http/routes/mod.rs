//! Route handlers organized by resource
//!
//! Every handler is a thin binding of a table descriptor and a rule list
//! onto one of the pipeline functions below.

use axum::http::StatusCode;
use axum::Json;
use indexmap::IndexMap;

use crate::db::Row;
use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::models::{validate, RequestInput, Rule, TableSpec};

pub mod company;
pub mod customer;
pub mod health;
pub mod listings;

/// `SELECT *` and return the rows as a JSON array.
pub(crate) async fn list_rows(
    state: &AppState,
    table: &'static TableSpec,
) -> ApiResult<Json<Vec<Row>>> {
    let rows = state.store.select_all(table).await?;
    tracing::debug!(table = table.name, rows = rows.len(), "listed rows");
    Ok(Json(rows))
}

/// Validate, then insert one row. A refused insert is a 400.
pub(crate) async fn create_row(
    state: &AppState,
    table: &'static TableSpec,
    rules: &[Rule],
    input: RequestInput,
) -> ApiResult<StatusCode> {
    let values = validate(rules, &input).into_result()?;
    let fields = into_fields(values);

    state
        .store
        .insert(table, &fields)
        .await
        .map_err(ApiError::from_insert)?;

    tracing::info!(entity = table.entity, "row created");
    Ok(StatusCode::OK)
}

/// Validate, then update the row named by the id path parameter.
///
/// Zero affected rows means the id does not exist.
pub(crate) async fn update_row(
    state: &AppState,
    table: &'static TableSpec,
    rules: &[Rule],
    input: RequestInput,
) -> ApiResult<StatusCode> {
    let mut values = validate(rules, &input).into_result()?;
    let id = take_id(&mut values, table)?;
    let fields = into_fields(values);

    let affected = state.store.update(table, &id, &fields).await?;
    expect_affected(table, &id, affected)
}

/// Validate, then delete the row named by the id path parameter.
pub(crate) async fn delete_row(
    state: &AppState,
    table: &'static TableSpec,
    rules: &[Rule],
    input: RequestInput,
) -> ApiResult<StatusCode> {
    let mut values = validate(rules, &input).into_result()?;
    let id = take_id(&mut values, table)?;

    let affected = state.store.delete(table, &id).await?;
    expect_affected(table, &id, affected)
}

/// Fallback for unknown paths
pub(crate) async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for known paths hit with an unrouted method
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn take_id(
    values: &mut IndexMap<&'static str, String>,
    table: &'static TableSpec,
) -> ApiResult<String> {
    values
        .shift_remove(table.id_column)
        .ok_or_else(|| ApiError::Internal {
            message: format!("no rule extracts {} for {}", table.id_column, table.name),
        })
}

fn into_fields(values: IndexMap<&'static str, String>) -> Vec<(&'static str, String)> {
    values.into_iter().collect()
}

fn expect_affected(table: &'static TableSpec, id: &str, affected: u64) -> ApiResult<StatusCode> {
    if affected == 0 {
        tracing::debug!(entity = table.entity, id, "write matched no row");
        return Err(match table.invalid_id_message {
            Some(message) => ApiError::InvalidId { message },
            None => ApiError::Internal {
                message: format!("{} has no write path", table.name),
            },
        });
    }
    tracing::info!(entity = table.entity, id, affected, "row written");
    Ok(StatusCode::OK)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value as JsonValue;
    use tower::ServiceExt;

    use crate::db::memory::MemoryStore;
    use crate::http::server::{build_router, AppState};

    pub(crate) fn app(store: MemoryStore) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let state = AppState {
            store: store.clone(),
        };
        (build_router(state), store)
    }

    /// Send one request; an empty response body comes back as `Null`.
    pub(crate) async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
