//! Record operations.
//!
//! Inserting, finding, deleting, and editing rows. Values cross into SQL as
//! bound parameters only; user text is never spliced into a statement.
//! Incoming text values are coerced against the column's declared type, and
//! an empty string always binds NULL.

use csvlite_core::{Value, coerce, quote_ident};
use rusqlite::{Connection, params_from_iter};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{columns_on, require_table};
use crate::error::{EditorError, Result};
use crate::location::DbLocation;

/// What an edit did: how many rows matched the criteria and how many were
/// changed. `updated` is at most 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    /// Rows that matched the selection criteria.
    pub matched: usize,
    /// Rows actually updated.
    pub updated: usize,
}

/// Inserts a record given as `(column, value)` pairs.
///
/// Columns not listed receive their default (usually NULL). Each value is
/// coerced against its column's declared type; text that does not parse as
/// that type is stored as text, and an empty string becomes NULL.
///
/// # Errors
///
/// [`EditorError::NoColumns`] when `values` is empty,
/// [`EditorError::ColumnNotFound`] when a named column is not in the table.
pub fn add_record(location: &DbLocation, table: &str, values: &[(String, String)]) -> Result<()> {
    if values.is_empty() {
        return Err(EditorError::NoColumns);
    }

    let conn = location.open()?;
    require_table(&conn, table)?;
    let columns = columns_on(&conn, table)?;

    let mut names = Vec::with_capacity(values.len());
    let mut params = Vec::with_capacity(values.len());
    for (name, raw) in values {
        let column = columns.iter().find(|c| &c.name == name).ok_or_else(|| {
            EditorError::ColumnNotFound {
                table: table.to_string(),
                column: name.clone(),
            }
        })?;
        names.push(quote_ident(name));
        params.push(to_sql_value(coerce(raw, column.sql_type())));
    }

    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("?{i}")).collect();
    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            names.join(", "),
            placeholders.join(", ")
        ),
        params_from_iter(params),
    )?;

    info!(table, columns = values.len(), "inserted record");
    Ok(())
}

/// Finds the rows matching all `(column, value)` filters and returns them as
/// display-ready cell text, one `Vec` per row in the table's column order.
///
/// With no filters every row is returned. Filter values are matched as bound
/// text against the stored value; NULL cells come back as `None`.
pub fn find_records(
    location: &DbLocation,
    table: &str,
    filters: &[(String, String)],
) -> Result<Vec<Vec<Option<String>>>> {
    let conn = location.open()?;
    require_table(&conn, table)?;
    let columns = columns_on(&conn, table)?;
    check_filter_columns(table, &columns, filters)?;

    let width = columns.len();
    let (clause, params) = where_clause(filters);
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}{clause}", quote_ident(table)))?;
    let rows = stmt
        .query_map(params_from_iter(params), |row| {
            (0..width)
                .map(|idx| {
                    row.get::<_, rusqlite::types::Value>(idx)
                        .map(display_cell)
                })
                .collect::<std::result::Result<Vec<_>, _>>()
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Deletes the rows matching all `(column, value)` filters and returns how
/// many were removed.
///
/// # Errors
///
/// [`EditorError::NoFilters`] when `filters` is empty (an unfiltered delete
/// would wipe the table), [`EditorError::NoMatch`] when no row matches.
pub fn delete_records(
    location: &DbLocation,
    table: &str,
    filters: &[(String, String)],
) -> Result<usize> {
    if filters.is_empty() {
        return Err(EditorError::NoFilters);
    }

    let conn = location.open()?;
    require_table(&conn, table)?;
    let columns = columns_on(&conn, table)?;
    check_filter_columns(table, &columns, filters)?;

    let (clause, params) = where_clause(filters);
    let matching: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}{clause}", quote_ident(table)),
        params_from_iter(params.clone()),
        |row| row.get(0),
    )?;
    if matching == 0 {
        return Err(EditorError::NoMatch);
    }

    let deleted = conn.execute(
        &format!("DELETE FROM {}{clause}", quote_ident(table)),
        params_from_iter(params),
    )?;

    info!(table, deleted, "deleted records");
    Ok(deleted)
}

/// Updates one field of one record.
///
/// The record is selected by `where_column = where_value`; when several rows
/// match, only the first by `rowid` is changed and a warning is logged. The
/// new value is coerced against the edited column's declared type.
///
/// # Errors
///
/// [`EditorError::ColumnNotFound`] when either column is missing,
/// [`EditorError::NoMatch`] when no row matches the selection.
pub fn edit_record(
    location: &DbLocation,
    table: &str,
    where_column: &str,
    where_value: &str,
    edit_column: &str,
    new_value: &str,
) -> Result<EditOutcome> {
    let conn = location.open()?;
    require_table(&conn, table)?;
    let columns = columns_on(&conn, table)?;

    let target = columns
        .iter()
        .find(|c| c.name == edit_column)
        .ok_or_else(|| EditorError::ColumnNotFound {
            table: table.to_string(),
            column: edit_column.to_string(),
        })?;
    if !columns.iter().any(|c| c.name == where_column) {
        return Err(EditorError::ColumnNotFound {
            table: table.to_string(),
            column: where_column.to_string(),
        });
    }

    let rowids = matching_rowids(&conn, table, where_column, where_value)?;
    let Some(first) = rowids.first().copied() else {
        return Err(EditorError::NoMatch);
    };
    if rowids.len() > 1 {
        warn!(
            table,
            column = where_column,
            matched = rowids.len(),
            "criteria match several rows; editing the first only"
        );
    }

    let value = to_sql_value(coerce(new_value, target.sql_type()));
    conn.execute(
        &format!(
            "UPDATE {} SET {} = ?1 WHERE rowid = ?2",
            quote_ident(table),
            quote_ident(edit_column)
        ),
        rusqlite::params![value, first],
    )?;

    info!(table, column = edit_column, rowid = first, "edited record");
    Ok(EditOutcome {
        matched: rowids.len(),
        updated: 1,
    })
}

fn matching_rowids(
    conn: &Connection,
    table: &str,
    column: &str,
    value: &str,
) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT rowid FROM {} WHERE {} = ?1 ORDER BY rowid",
        quote_ident(table),
        quote_ident(column)
    ))?;
    let rowids = stmt
        .query_map([value], |row| row.get(0))?
        .collect::<std::result::Result<Vec<i64>, _>>()?;
    Ok(rowids)
}

fn check_filter_columns(
    table: &str,
    columns: &[crate::catalog::ColumnInfo],
    filters: &[(String, String)],
) -> Result<()> {
    for (name, _) in filters {
        if !columns.iter().any(|c| &c.name == name) {
            return Err(EditorError::ColumnNotFound {
                table: table.to_string(),
                column: name.clone(),
            });
        }
    }
    Ok(())
}

/// Builds ` WHERE a = ?1 AND b = ?2` plus the bound values, or an empty
/// clause for no filters.
fn where_clause(filters: &[(String, String)]) -> (String, Vec<rusqlite::types::Value>) {
    if filters.is_empty() {
        return (String::new(), Vec::new());
    }
    let predicates: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(idx, (name, _))| format!("{} = ?{}", quote_ident(name), idx + 1))
        .collect();
    let params = filters
        .iter()
        .map(|(_, value)| rusqlite::types::Value::Text(value.clone()))
        .collect();
    (format!(" WHERE {}", predicates.join(" AND ")), params)
}

fn to_sql_value(value: Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(n) => rusqlite::types::Value::Integer(n),
        Value::Real(x) => rusqlite::types::Value::Real(x),
        Value::Text(s) => rusqlite::types::Value::Text(s),
    }
}

fn display_cell(value: rusqlite::types::Value) -> Option<String> {
    match value {
        rusqlite::types::Value::Null => None,
        rusqlite::types::Value::Integer(n) => Some(n.to_string()),
        rusqlite::types::Value::Real(x) => Some(x.to_string()),
        rusqlite::types::Value::Text(s) => Some(s),
        rusqlite::types::Value::Blob(b) => Some(format!("<blob {} bytes>", b.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_empty() {
        let (clause, params) = where_clause(&[]);
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_where_clause_numbers_placeholders() {
        let filters = vec![
            ("name".to_string(), "Alice".to_string()),
            ("age".to_string(), "30".to_string()),
        ];
        let (clause, params) = where_clause(&filters);
        assert_eq!(clause, " WHERE \"name\" = ?1 AND \"age\" = ?2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_display_cell() {
        assert_eq!(display_cell(rusqlite::types::Value::Null), None);
        assert_eq!(
            display_cell(rusqlite::types::Value::Integer(7)),
            Some("7".to_string())
        );
        assert_eq!(
            display_cell(rusqlite::types::Value::Text("hi".to_string())),
            Some("hi".to_string())
        );
    }

    #[test]
    fn test_add_record_rejects_empty_values() {
        let loc = DbLocation::new("/nonexistent", "db");
        assert!(matches!(
            add_record(&loc, "t", &[]),
            Err(EditorError::NoColumns)
        ));
    }

    #[test]
    fn test_delete_records_rejects_empty_filters() {
        let loc = DbLocation::new("/nonexistent", "db");
        assert!(matches!(
            delete_records(&loc, "t", &[]),
            Err(EditorError::NoFilters)
        ));
    }
}
