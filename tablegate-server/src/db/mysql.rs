//! MySQL/MariaDB-backed table store
//!
//! Each call checks out one connection, runs one statement, and lets the
//! `PoolConnection` guard drop, which hands the connection back to the
//! pool whether the statement succeeded or not.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use super::store::{DbError, Fields, Row, TableStore};
use super::{pool, sql};
use crate::models::TableSpec;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        pool::ping(&self.pool).await
    }

    async fn execute(&self, statement: &str, params: Vec<&str>) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        let mut query = sqlx::query(statement);
        for param in params {
            query = query.bind(param);
        }
        let result = query.execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TableStore for MySqlStore {
    async fn select_all(&self, table: &'static TableSpec) -> Result<Vec<Row>, DbError> {
        let statement = sql::select_all(table);
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query(&statement).fetch_all(&mut *conn).await?;
        drop(conn);

        rows.iter().map(decode_row).collect()
    }

    async fn insert(&self, table: &'static TableSpec, fields: &Fields) -> Result<u64, DbError> {
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let statement = sql::insert(table, &columns);
        let params = fields.iter().map(|(_, value)| value.as_str()).collect();
        self.execute(&statement, params).await
    }

    async fn update(
        &self,
        table: &'static TableSpec,
        id: &str,
        fields: &Fields,
    ) -> Result<u64, DbError> {
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let statement = sql::update(table, &columns);
        let mut params: Vec<&str> = fields.iter().map(|(_, value)| value.as_str()).collect();
        params.push(id);
        self.execute(&statement, params).await
    }

    async fn delete(&self, table: &'static TableSpec, id: &str) -> Result<u64, DbError> {
        self.execute(&sql::delete(table), vec![id]).await
    }
}

/// Decode every column of a row into JSON, keeping column order.
fn decode_row(row: &MySqlRow) -> Result<Row, DbError> {
    let mut value = Row::with_capacity(row.len());
    for (i, column) in row.columns().iter().enumerate() {
        let decoded = decode_column(row, i, column.type_info().name())?;
        value.insert(column.name().to_string(), decoded);
    }
    Ok(value)
}

/// How a column's value is pulled out of the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Time,
    /// Sent as a two-byte integer, not text
    Year,
    Json,
    Binary,
    Text,
}

fn column_kind(type_name: &str) -> ColumnKind {
    match type_name {
        "BOOLEAN" => ColumnKind::Bool,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => ColumnKind::Unsigned,
        "FLOAT" => ColumnKind::Float,
        "DOUBLE" => ColumnKind::Double,
        "DECIMAL" => ColumnKind::Decimal,
        "DATE" => ColumnKind::Date,
        "DATETIME" => ColumnKind::DateTime,
        "TIMESTAMP" => ColumnKind::Timestamp,
        "TIME" => ColumnKind::Time,
        "YEAR" => ColumnKind::Year,
        "JSON" => ColumnKind::Json,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => ColumnKind::Binary,
        // CHAR, VARCHAR, TEXT, ENUM, SET and friends
        _ => ColumnKind::Text,
    }
}

fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<JsonValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(JsonValue::Null);
    }

    let value = match column_kind(type_name) {
        ColumnKind::Bool => JsonValue::Bool(row.try_get(index)?),
        ColumnKind::Signed => JsonValue::from(row.try_get::<i64, _>(index)?),
        ColumnKind::Unsigned => JsonValue::from(row.try_get::<u64, _>(index)?),
        ColumnKind::Float => JsonValue::from(f64::from(row.try_get::<f32, _>(index)?)),
        ColumnKind::Double => JsonValue::from(row.try_get::<f64, _>(index)?),
        // Exact decimals stay textual so no precision is lost
        ColumnKind::Decimal => JsonValue::String(row.try_get_unchecked::<String, _>(index)?),
        ColumnKind::Date => JsonValue::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        ColumnKind::DateTime => JsonValue::String(
            row.try_get::<NaiveDateTime, _>(index)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        ColumnKind::Timestamp => {
            JsonValue::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339())
        }
        ColumnKind::Time => JsonValue::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        // sqlx has no YEAR mapping; the integer decoder reads it as-is
        ColumnKind::Year => JsonValue::from(row.try_get_unchecked::<u16, _>(index)?),
        ColumnKind::Json => row.try_get::<JsonValue, _>(index)?,
        ColumnKind::Binary => {
            JsonValue::String(STANDARD.encode(row.try_get_unchecked::<Vec<u8>, _>(index)?))
        }
        ColumnKind::Text => JsonValue::String(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AGENTS, COMPANY, CUSTOMER};
    use tablegate_core::DatabaseConfig;

    // Integration tests against the sample schema
    // Run with: DATABASE_URL=mysql://... cargo test -p tablegate-server -- --ignored

    fn store() -> MySqlStore {
        let config = DatabaseConfig {
            url: Some(std::env::var("DATABASE_URL").expect("DATABASE_URL required")),
            ..DatabaseConfig::default()
        };
        MySqlStore::new(pool::create_pool(&config).expect("pool creation failed"))
    }

    fn company(id: &str, name: &str, city: &str) -> Vec<(&'static str, String)> {
        vec![
            ("COMPANY_ID", id.to_string()),
            ("COMPANY_NAME", name.to_string()),
            ("COMPANY_CITY", city.to_string()),
        ]
    }

    #[test]
    fn year_and_geometry_are_not_read_as_text() {
        assert_eq!(column_kind("YEAR"), ColumnKind::Year);
        assert_eq!(column_kind("GEOMETRY"), ColumnKind::Binary);
        assert_eq!(column_kind("VARCHAR"), ColumnKind::Text);
        assert_eq!(column_kind("DECIMAL"), ColumnKind::Decimal);
        assert_eq!(column_kind("INT UNSIGNED"), ColumnKind::Unsigned);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn year_column_decodes_as_number() {
        let store = store();
        let mut conn = store.pool().acquire().await.expect("acquire failed");
        sqlx::query("CREATE TEMPORARY TABLE founded (ID INT, FOUNDED YEAR)")
            .execute(&mut *conn)
            .await
            .expect("create failed");
        sqlx::query("INSERT INTO founded VALUES (1, 1999)")
            .execute(&mut *conn)
            .await
            .expect("insert failed");

        let row = sqlx::query("SELECT * FROM founded WHERE ID = ?")
            .bind(1)
            .fetch_one(&mut *conn)
            .await
            .expect("select failed");
        let decoded = decode_row(&row).expect("decode failed");
        assert_eq!(decoded["FOUNDED"], JsonValue::from(1999));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn lists_decode_every_table() {
        let store = store();
        for table in [&AGENTS, &COMPANY, &CUSTOMER] {
            let rows = store.select_all(table).await.expect("select failed");
            for row in rows {
                assert!(row.contains_key(table.id_column));
            }
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn company_write_cycle() {
        let store = store();
        let id = "ZZ9";
        store.delete(&COMPANY, id).await.expect("cleanup failed");

        assert_eq!(store.insert(&COMPANY, &company(id, "Acme", "NYC")).await.unwrap(), 1);

        let dup = store.insert(&COMPANY, &company(id, "Acme", "NYC")).await.unwrap_err();
        assert!(matches!(dup, DbError::Rejected { .. }));

        let renamed = [("COMPANY_NAME", "Acme Corp".to_string())];
        assert_eq!(store.update(&COMPANY, id, &renamed).await.unwrap(), 1);
        assert_eq!(store.update(&COMPANY, "NOPE", &renamed).await.unwrap(), 0);

        assert_eq!(store.delete(&COMPANY, id).await.unwrap(), 1);
        assert_eq!(store.delete(&COMPANY, id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn closed_pool_is_connection_error() {
        let store = store();
        store.pool().close().await;
        let err = store.select_all(&COMPANY).await.unwrap_err();
        assert!(err.is_connection());
    }
}
