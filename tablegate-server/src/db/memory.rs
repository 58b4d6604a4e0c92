//! In-memory table store for router tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::store::{DbError, Fields, Row, TableStore};
use crate::models::TableSpec;

/// Failure injected into every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    None,
    /// Pool closed / unreachable server
    Connection,
    /// Server refuses every statement
    Rejected,
}

pub(crate) struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Row>>>,
    fault: Fault,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            fault: Fault::None,
        }
    }

    pub(crate) fn failing(fault: Fault) -> Self {
        Self {
            fault,
            ..Self::new()
        }
    }

    pub(crate) fn with_rows(self, table: &'static TableSpec, rows: Vec<Row>) -> Self {
        self.tables
            .lock()
            .unwrap()
            .entry(table.name)
            .or_default()
            .extend(rows);
        self
    }

    pub(crate) fn rows(&self, table: &'static TableSpec) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table.name)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), DbError> {
        match self.fault {
            Fault::None => Ok(()),
            Fault::Connection => Err(DbError::Connection(sqlx::Error::PoolClosed)),
            Fault::Rejected => Err(DbError::Rejected {
                message: "Table 'sample.company' doesn't exist".to_string(),
                code: Some("42S02".to_string()),
            }),
        }
    }
}

/// Build a row from string pairs
pub(crate) fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect()
}

fn matches_id(row: &Row, table: &TableSpec, id: &str) -> bool {
    row.get(table.id_column).and_then(JsonValue::as_str) == Some(id)
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select_all(&self, table: &'static TableSpec) -> Result<Vec<Row>, DbError> {
        self.check()?;
        Ok(self.rows(table))
    }

    async fn insert(&self, table: &'static TableSpec, fields: &Fields) -> Result<u64, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.name).or_default();

        let id = fields
            .iter()
            .find(|(column, _)| *column == table.id_column)
            .map(|(_, value)| value.as_str());
        if let Some(id) = id {
            if rows.iter().any(|r| matches_id(r, table, id)) {
                return Err(DbError::Rejected {
                    message: format!("Duplicate entry '{id}' for key 'PRIMARY'"),
                    code: Some("23000".to_string()),
                });
            }
        }

        rows.push(
            fields
                .iter()
                .map(|(column, value)| (column.to_string(), JsonValue::String(value.clone())))
                .collect(),
        );
        Ok(1)
    }

    async fn update(
        &self,
        table: &'static TableSpec,
        id: &str,
        fields: &Fields,
    ) -> Result<u64, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let mut affected = 0;
        for row in tables.entry(table.name).or_default().iter_mut() {
            if matches_id(row, table, id) {
                for (column, value) in fields {
                    row.insert(column.to_string(), JsonValue::String(value.clone()));
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, table: &'static TableSpec, id: &str) -> Result<u64, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.name).or_default();
        let before = rows.len();
        rows.retain(|r| !matches_id(r, table, id));
        Ok((before - rows.len()) as u64)
    }
}
