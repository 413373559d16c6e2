//! The CSV → SQLite import pipeline.
//!
//! [`import_csv`] takes a [`ImportRequest`], validates it, decodes and
//! parses the source file, infers a destination schema, replaces the target
//! table, bulk-loads all rows in a single transaction, and verifies the
//! committed row count. On success it returns an [`ImportSummary`]; every
//! failure maps to one variant of [`ImportError`](crate::ImportError).
//!
//! The database connection is scoped to this one call and is released on
//! every exit path when it drops.

use std::fs;
use std::path::{Path, PathBuf};

use csvlite_core::{ColumnDef, Value, coerce, dedup_columns, is_valid_table_name, quote_ident,
    sanitize_column};
use rusqlite::{Connection, params_from_iter};
use serde::Serialize;
use tracing::{info, warn};

use crate::decode;
use crate::error::{ImportError, Result};
use crate::infer::infer_schema;

/// Inputs for one conversion call.
///
/// Constructed per conversion and discarded after.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Path of the source CSV file.
    pub csv_path: PathBuf,
    /// Directory the database file is created in (created if missing).
    pub dest_dir: PathBuf,
    /// Database file name; `.db` is appended when absent.
    pub db_name: String,
    /// Name of the table to create (replacing any existing one).
    pub table_name: String,
}

impl ImportRequest {
    /// Creates a request from the four conversion inputs.
    pub fn new(
        csv_path: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        db_name: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            csv_path: csv_path.into(),
            dest_dir: dest_dir.into(),
            db_name: db_name.into(),
            table_name: table_name.into(),
        }
    }
}

/// What a successful import produced.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// Full path of the destination database file.
    pub db_path: PathBuf,
    /// Name of the created table.
    pub table: String,
    /// Number of rows loaded.
    pub rows: usize,
    /// Number of columns in the created table.
    pub columns: usize,
}

/// Joins directory and file name, appending `.db` when the name lacks it
/// (case-insensitive).
pub fn resolve_db_path(dir: &Path, name: &str) -> PathBuf {
    if name.to_ascii_lowercase().ends_with(".db") {
        dir.join(name)
    } else {
        dir.join(format!("{name}.db"))
    }
}

/// Converts a CSV file into a table of a SQLite database.
///
/// See the module docs for the pipeline; on success the destination table
/// contains exactly the parsed rows, replacing any previous table of the
/// same name.
pub fn import_csv(request: &ImportRequest) -> Result<ImportSummary> {
    validate_request(request)?;

    fs::create_dir_all(&request.dest_dir).map_err(|err| {
        ImportError::PermissionDenied(format!(
            "cannot create directory '{}': {err}",
            request.dest_dir.display()
        ))
    })?;
    let db_path = resolve_db_path(&request.dest_dir, &request.db_name);

    if !request
        .csv_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    {
        warn!(path = %request.csv_path.display(), "source file does not have a .csv extension");
    }

    let content = decode::read_to_string(&request.csv_path)?;
    let (raw_headers, rows) = parse_csv(&content)?;

    let headers = dedup_columns(raw_headers.iter().map(|h| sanitize_column(h)).collect());
    let schema = infer_schema(&headers, &rows);

    let mut conn = Connection::open(&db_path)?;
    replace_table(&conn, &request.table_name, &schema)?;
    insert_rows(&mut conn, &request.table_name, &schema, &rows)?;

    let found = count_rows(&conn, &request.table_name)?;
    if found != rows.len() {
        return Err(ImportError::IntegrityCheckFailed {
            expected: rows.len(),
            found,
        });
    }

    info!(
        db = %db_path.display(),
        table = %request.table_name,
        rows = rows.len(),
        columns = schema.len(),
        "import complete"
    );

    Ok(ImportSummary {
        db_path,
        table: request.table_name.clone(),
        rows: rows.len(),
        columns: schema.len(),
    })
}

/// Checks the request up front: non-empty inputs, readable source, legal
/// table name.
fn validate_request(request: &ImportRequest) -> Result<()> {
    if request.csv_path.as_os_str().is_empty()
        || request.dest_dir.as_os_str().is_empty()
        || request.db_name.is_empty()
        || request.table_name.is_empty()
    {
        return Err(ImportError::InvalidArgument(
            "csv path, destination directory, database name, and table name must all be provided"
                .to_string(),
        ));
    }

    if !request.csv_path.exists() {
        return Err(ImportError::FileNotFound(request.csv_path.clone()));
    }
    // Probe readability up front so the failure is a permission error, not a
    // decode error halfway through the pipeline.
    fs::File::open(&request.csv_path).map_err(|err| {
        ImportError::PermissionDenied(format!(
            "cannot read '{}': {err}",
            request.csv_path.display()
        ))
    })?;

    if !is_valid_table_name(&request.table_name) {
        return Err(ImportError::InvalidIdentifier(request.table_name.clone()));
    }

    Ok(())
}

/// Parses decoded CSV text into headers and rows.
///
/// # Errors
///
/// [`ImportError::MalformedInput`] for structural failures (e.g. a row with
/// the wrong number of fields), [`ImportError::EmptyInput`] when the file
/// has no header or no data rows.
fn parse_csv(content: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| ImportError::MalformedInput(err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| ImportError::MalformedInput(err.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    Ok((headers, rows))
}

/// Drops any pre-existing table of the same name and creates the new one.
fn replace_table(conn: &Connection, table: &str, schema: &[ColumnDef]) -> Result<()> {
    conn.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])?;

    let columns: Vec<String> = schema
        .iter()
        .map(|col| format!("{} {}", quote_ident(&col.name), col.sql_type))
        .collect();
    conn.execute(
        &format!("CREATE TABLE {} ({})", quote_ident(table), columns.join(", ")),
        [],
    )?;
    Ok(())
}

/// Bulk-inserts all rows inside a single transaction.
///
/// Cell values are coerced against the inferred column type (empty → NULL).
/// Any insertion error rolls the transaction back and surfaces as
/// [`ImportError::WriteFailure`].
fn insert_rows(
    conn: &mut Connection,
    table: &str,
    schema: &[ColumnDef],
    rows: &[Vec<String>],
) -> Result<()> {
    let tx = conn.transaction()?;
    {
        let columns: Vec<String> = schema.iter().map(|c| quote_ident(&c.name)).collect();
        let placeholders: Vec<String> = (1..=schema.len()).map(|i| format!("?{i}")).collect();
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            columns.join(", "),
            placeholders.join(", ")
        ))?;

        for row in rows {
            let params = schema.iter().enumerate().map(|(idx, col)| {
                let raw = row.get(idx).map(String::as_str).unwrap_or("");
                to_sql_value(coerce(raw, col.sql_type))
            });
            // Returning here drops the uncommitted transaction, rolling back.
            stmt.execute(params_from_iter(params))
                .map_err(|err| ImportError::WriteFailure(err.to_string()))?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
        [],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn to_sql_value(value: Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(n) => rusqlite::types::Value::Integer(n),
        Value::Real(x) => rusqlite::types::Value::Real(x),
        Value::Text(s) => rusqlite::types::Value::Text(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_appends_suffix() {
        let dir = Path::new("/tmp/out");
        assert_eq!(resolve_db_path(dir, "data"), PathBuf::from("/tmp/out/data.db"));
        assert_eq!(resolve_db_path(dir, "data.db"), PathBuf::from("/tmp/out/data.db"));
        assert_eq!(resolve_db_path(dir, "DATA.DB"), PathBuf::from("/tmp/out/DATA.DB"));
    }

    #[test]
    fn test_parse_csv_basic() {
        let (headers, rows) = parse_csv("a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_parse_csv_header_only_is_empty_input() {
        assert!(matches!(parse_csv("a,b\n"), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn test_parse_csv_empty_file_is_empty_input() {
        assert!(matches!(parse_csv(""), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn test_parse_csv_ragged_row_is_malformed() {
        assert!(matches!(
            parse_csv("a,b\n1,2,3\n"),
            Err(ImportError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_inputs() {
        let request = ImportRequest::new("", "/tmp", "db", "t");
        assert!(matches!(
            validate_request(&request),
            Err(ImportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_table_name() {
        // The file must exist for validation to reach the name check.
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixture.csv");
        std::fs::write(&path, "a\n1\n").unwrap();

        let request = ImportRequest::new(&path, dir.path(), "db", "bad name!");
        assert!(matches!(
            validate_request(&request),
            Err(ImportError::InvalidIdentifier(_))
        ));

        let request = ImportRequest::new(&path, dir.path(), "db", "ok-name_1");
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let request = ImportRequest::new("/nonexistent/nope.csv", "/tmp", "db", "t");
        assert!(matches!(
            validate_request(&request),
            Err(ImportError::FileNotFound(_))
        ));
    }
}
