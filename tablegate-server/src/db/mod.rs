//! Database layer - connection pool, statement text, and table stores
//!
//! # Design Principles
//!
//! - Bounded connection pool (default 5); handlers never share a connection
//! - One statement per request, positional parameters only
//! - Affected-row count stands in for existence checks (no read-then-write)
//! - Connections are scoped guards, released to the pool on every exit path

pub mod mysql;
pub mod pool;
pub mod sql;
pub mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use mysql::MySqlStore;
pub use pool::{close_pool, connect_options, create_pool};
pub use store::{DbError, Fields, Row, TableStore};
