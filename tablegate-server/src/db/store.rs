//! Table store abstraction and database error classification

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::models::TableSpec;

/// One result row, column order preserved
pub type Row = IndexMap<String, JsonValue>;

/// Column/value pairs bound to a write, in statement order
pub type Fields = [(&'static str, String)];

/// Database error, classified by what the caller should do with it
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No usable connection: pool closed, exhausted past the acquire
    /// timeout, or the socket failed
    #[error("connection unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    /// The server refused the statement (duplicate key, constraint, syntax)
    #[error("statement rejected: {message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    /// Anything else that went wrong running the statement or decoding rows
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => Self::Rejected {
                message: db.message().to_string(),
                code: db.code().map(|c| c.into_owned()),
            },
            err @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)) => Self::Connection(err),
            other => Self::Query(other),
        }
    }
}

/// Executes the four statement shapes against a table.
///
/// Every method runs exactly one statement on one pooled connection and
/// gives the connection back before returning. Write methods report the
/// affected-row count; callers treat zero as "no such id".
#[async_trait]
pub trait TableStore: Send + Sync + 'static {
    /// `SELECT * FROM <table>`
    async fn select_all(&self, table: &'static TableSpec) -> Result<Vec<Row>, DbError>;

    /// `INSERT INTO <table> (<cols>) VALUES (?, ...)`
    async fn insert(&self, table: &'static TableSpec, fields: &Fields) -> Result<u64, DbError>;

    /// `UPDATE <table> SET <col>=?, ... WHERE <id>=?`
    async fn update(
        &self,
        table: &'static TableSpec,
        id: &str,
        fields: &Fields,
    ) -> Result<u64, DbError>;

    /// `DELETE FROM <table> WHERE <id>=?`
    async fn delete(&self, table: &'static TableSpec, id: &str) -> Result<u64, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_connection_errors() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_connection());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_connection());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(DbError::from(sqlx::Error::Io(io)).is_connection());
    }

    #[test]
    fn other_failures_are_query_errors() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Query(_)));
        assert!(!err.is_connection());
    }
}
