//! Statement text for each operation shape
//!
//! Identifiers come from [`TableSpec`]; every value is a `?` placeholder.

use crate::models::TableSpec;

pub fn select_all(table: &TableSpec) -> String {
    format!("SELECT * FROM {}", table.name)
}

pub fn insert(table: &TableSpec, columns: &[&str]) -> String {
    debug_assert!(columns.iter().all(|c| table.knows(c)));
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        columns.join(", "),
        placeholders
    )
}

pub fn update(table: &TableSpec, columns: &[&str]) -> String {
    debug_assert!(columns.iter().all(|c| table.knows(c)));
    let assignments = columns
        .iter()
        .map(|c| format!("{c}=?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {}=?",
        table.name, assignments, table.id_column
    )
}

pub fn delete(table: &TableSpec) -> String {
    format!("DELETE FROM {} WHERE {}=?", table.name, table.id_column)
}
