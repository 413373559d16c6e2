//! Table structure operations.
//!
//! Creating and dropping tables, and adding or removing columns. SQLite has
//! no native `DROP COLUMN` path that predates 3.35, and the one it has
//! refuses several shapes of table, so column removal rebuilds the table
//! through a temporary copy inside one transaction.

use csvlite_core::{SqlType, is_valid_identifier, quote_ident};
use tracing::info;

use crate::catalog::{columns_on, require_table};
use crate::error::{EditorError, Result};
use crate::location::DbLocation;

/// One column of a table to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Storage type of the column.
    pub sql_type: SqlType,
    /// Whether the column is the primary key.
    pub primary_key: bool,
}

impl ColumnSpec {
    /// Creates a non-key column spec.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            primary_key: false,
        }
    }

    /// Marks the column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Creates a new table with the given columns.
///
/// # Errors
///
/// [`EditorError::NoColumns`] when `columns` is empty,
/// [`EditorError::InvalidIdentifier`] when the table or a column name is not
/// a legal identifier, [`EditorError::DatabaseError`] when a table of that
/// name already exists.
pub fn add_table(location: &DbLocation, table: &str, columns: &[ColumnSpec]) -> Result<()> {
    if columns.is_empty() {
        return Err(EditorError::NoColumns);
    }
    check_identifier(table)?;
    for column in columns {
        check_identifier(&column.name)?;
    }

    let conn = location.open()?;
    let defs: Vec<String> = columns
        .iter()
        .map(|col| {
            let mut def = format!("{} {}", quote_ident(&col.name), col.sql_type);
            if col.primary_key {
                def.push_str(" PRIMARY KEY");
            }
            def
        })
        .collect();
    conn.execute(
        &format!("CREATE TABLE {} ({})", quote_ident(table), defs.join(", ")),
        [],
    )?;

    info!(table, columns = columns.len(), "created table");
    Ok(())
}

/// Drops a table and all of its records.
///
/// # Errors
///
/// [`EditorError::TableNotFound`] when the table does not exist.
pub fn delete_table(location: &DbLocation, table: &str) -> Result<()> {
    let conn = location.open()?;
    require_table(&conn, table)?;
    conn.execute(&format!("DROP TABLE {}", quote_ident(table)), [])?;

    info!(table, "dropped table");
    Ok(())
}

/// Adds a column to an existing table.
///
/// Existing rows receive `default` in the new column, or NULL when no
/// default is given. An empty default string counts as no default.
pub fn add_column(
    location: &DbLocation,
    table: &str,
    column: &str,
    sql_type: SqlType,
    default: Option<&str>,
) -> Result<()> {
    check_identifier(column)?;

    let conn = location.open()?;
    require_table(&conn, table)?;

    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote_ident(table),
        quote_ident(column),
        sql_type
    );
    if let Some(value) = default.filter(|v| !v.is_empty()) {
        sql.push_str(&format!(" DEFAULT '{}'", value.replace('\'', "''")));
    }
    conn.execute(&sql, [])?;

    info!(table, column, "added column");
    Ok(())
}

/// Removes a column from a table, keeping all other data.
///
/// The table is rebuilt without the column: a temporary copy selecting the
/// surviving columns is created, the original is dropped, and the copy is
/// renamed into place. All three steps run in one transaction, so a failure
/// part-way leaves the original table untouched.
///
/// # Errors
///
/// [`EditorError::ColumnNotFound`] when the column does not exist,
/// [`EditorError::LastColumn`] when it is the table's only column.
pub fn delete_column(location: &DbLocation, table: &str, column: &str) -> Result<()> {
    let conn = location.open()?;
    require_table(&conn, table)?;

    let columns = columns_on(&conn, table)?;
    if !columns.iter().any(|c| c.name == column) {
        return Err(EditorError::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    if columns.len() == 1 {
        return Err(EditorError::LastColumn(table.to_string()));
    }

    let survivors: Vec<String> = columns
        .iter()
        .filter(|c| c.name != column)
        .map(|c| quote_ident(&c.name))
        .collect();
    let temp = format!("{table}_temp");

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        &format!(
            "CREATE TABLE {} AS SELECT {} FROM {}",
            quote_ident(&temp),
            survivors.join(", "),
            quote_ident(table)
        ),
        [],
    )?;
    tx.execute(&format!("DROP TABLE {}", quote_ident(table)), [])?;
    tx.execute(
        &format!(
            "ALTER TABLE {} RENAME TO {}",
            quote_ident(&temp),
            quote_ident(table)
        ),
        [],
    )?;
    tx.commit()?;

    info!(table, column, "removed column");
    Ok(())
}

fn check_identifier(name: &str) -> Result<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(EditorError::InvalidIdentifier(name.to_string()))
    }
}
