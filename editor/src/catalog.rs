//! Catalog inspection.
//!
//! Read-only views over a database's tables and columns, backed by
//! `sqlite_master` and `PRAGMA table_info`. SQLite-internal tables
//! (`sqlite_sequence` and friends) are never reported.

use csvlite_core::SqlType;
use rusqlite::Connection;
use serde::Serialize;

use crate::error::{EditorError, Result};
use crate::location::DbLocation;

/// One column of a table, as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// The type string the column was declared with, verbatim.
    pub declared_type: String,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
}

impl ColumnInfo {
    /// The declared type mapped onto a storage type by affinity.
    pub fn sql_type(&self) -> SqlType {
        SqlType::from_declared(&self.declared_type)
    }
}

/// Lists the user tables of the database, sorted by name.
pub fn list_tables(location: &DbLocation) -> Result<Vec<String>> {
    let conn = location.open()?;
    tables_on(&conn)
}

/// Lists the columns of a table.
///
/// # Errors
///
/// [`EditorError::TableNotFound`] when the table does not exist.
pub fn table_columns(location: &DbLocation, table: &str) -> Result<Vec<ColumnInfo>> {
    let conn = location.open()?;
    require_table(&conn, table)?;
    columns_on(&conn, table)
}

pub(crate) fn tables_on(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(names)
}

/// Fails with [`EditorError::TableNotFound`] unless the table exists.
pub(crate) fn require_table(conn: &Connection, table: &str) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [table],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(EditorError::TableNotFound(table.to_string()))
    }
}

pub(crate) fn columns_on(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare(&format!(
        "PRAGMA table_info({})",
        csvlite_core::quote_ident(table)
    ))?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                declared_type: row.get(2)?,
                primary_key: row.get::<_, i64>(5)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}
