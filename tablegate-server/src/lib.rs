//! tablegate-server: HTTP-to-SQL bridge
//!
//! Exposes list/create/update/delete endpoints over the `agents`, `company`
//! and `customer` tables. Every request is validated, bound to a single
//! parameterized statement, and executed on a pooled connection.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError, MySqlStore, TableStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
