//! Static table descriptors
//!
//! SQL text is only ever built from these descriptors. User input reaches
//! the database through bound parameters, never through identifiers.

/// Description of one table exposed over HTTP
#[derive(Debug, PartialEq, Eq)]
pub struct TableSpec {
    /// SQL table name
    pub name: &'static str,
    /// Entity name used in log lines
    pub entity: &'static str,
    /// Column that uniquely identifies a row
    pub id_column: &'static str,
    /// Columns this service may write, in insert order
    pub writable: &'static [&'static str],
    /// Body of the 400 returned when a write matches no row; `None` for
    /// read-only tables
    pub invalid_id_message: Option<&'static str>,
}

impl TableSpec {
    /// Whether `column` may appear in generated SQL for this table
    pub fn knows(&self, column: &str) -> bool {
        column == self.id_column || self.writable.contains(&column)
    }
}

/// Read-only; columns are whatever the table holds.
pub static AGENTS: TableSpec = TableSpec {
    name: "agents",
    entity: "agent",
    id_column: "AGENT_CODE",
    writable: &[],
    invalid_id_message: None,
};

pub static COMPANY: TableSpec = TableSpec {
    name: "company",
    entity: "company",
    id_column: "COMPANY_ID",
    writable: &["COMPANY_ID", "COMPANY_NAME", "COMPANY_CITY"],
    invalid_id_message: Some("Invalid company Id supplied"),
};

/// Only `CUST_NAME` is mutable through the API.
pub static CUSTOMER: TableSpec = TableSpec {
    name: "customer",
    entity: "customer",
    id_column: "CUST_CODE",
    writable: &["CUST_NAME"],
    invalid_id_message: Some("Invalid Customer code supplied"),
};
