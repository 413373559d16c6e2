//! Integration tests for the csvlite-editor crate.

use csvlite_core::SqlType;
use csvlite_editor::{
    ColumnSpec, DbLocation, EditorError, SessionConfig, add_column, add_record, add_table,
    delete_column, delete_records, delete_table, edit_record, find_records, list_tables,
    table_columns,
};
use rusqlite::Connection;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Creates an empty database file and returns its location.
fn empty_db(dir: &TempDir, name: &str) -> DbLocation {
    let loc = DbLocation::new(dir.path(), name);
    let conn = Connection::open(loc.db_path()).expect("failed to create database file");
    // Touch the schema so the file exists on disk.
    conn.execute_batch("PRAGMA user_version = 0;").unwrap();
    loc
}

/// Creates a database with a populated `people` table.
fn people_db(dir: &TempDir) -> DbLocation {
    let loc = empty_db(dir, "people");
    let conn = Connection::open(loc.db_path()).unwrap();
    conn.execute_batch(
        "CREATE TABLE people (name TEXT, age INTEGER, score REAL);
         INSERT INTO people VALUES ('Alice', 30, 9.5);
         INSERT INTO people VALUES ('Bob', 25, 7.0);
         INSERT INTO people VALUES ('Bob', 40, 3.0);",
    )
    .unwrap();
    loc
}

fn query_one<T: rusqlite::types::FromSql>(loc: &DbLocation, sql: &str) -> T {
    let conn = Connection::open(loc.db_path()).unwrap();
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn lists_tables_sorted() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);
    let conn = Connection::open(loc.db_path()).unwrap();
    conn.execute_batch("CREATE TABLE animals (kind TEXT);").unwrap();

    assert_eq!(list_tables(&loc).unwrap(), vec!["animals", "people"]);
}

#[test]
fn lists_columns_with_declared_types() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    let cols = table_columns(&loc, "people").unwrap();
    let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age", "score"]);
    assert_eq!(cols[1].declared_type, "INTEGER");
    assert_eq!(cols[2].sql_type(), SqlType::Real);
}

#[test]
fn columns_of_missing_table_fail() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);
    assert!(matches!(
        table_columns(&loc, "ghosts"),
        Err(EditorError::TableNotFound(_))
    ));
}

#[test]
fn missing_database_file_is_not_created() {
    let dir = TempDir::new().unwrap();
    let loc = DbLocation::new(dir.path(), "absent");
    assert!(matches!(
        list_tables(&loc),
        Err(EditorError::DatabaseNotFound(_))
    ));
    assert!(!loc.db_path().exists());
}

// ---------------------------------------------------------------------------
// Table structure
// ---------------------------------------------------------------------------

#[test]
fn creates_table_with_primary_key() {
    let dir = TempDir::new().unwrap();
    let loc = empty_db(&dir, "store");

    add_table(
        &loc,
        "items",
        &[
            ColumnSpec::new("id", SqlType::Integer).primary_key(),
            ColumnSpec::new("label", SqlType::Text),
        ],
    )
    .unwrap();

    let cols = table_columns(&loc, "items").unwrap();
    assert_eq!(cols.len(), 2);
    assert!(cols[0].primary_key);
    assert!(!cols[1].primary_key);
}

#[test]
fn creating_duplicate_table_fails() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);
    let cols = vec![ColumnSpec::new("x", SqlType::Text)];
    assert!(matches!(
        add_table(&loc, "people", &cols),
        Err(EditorError::DatabaseError(_))
    ));
}

#[test]
fn drops_table() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    delete_table(&loc, "people").unwrap();
    assert!(list_tables(&loc).unwrap().is_empty());

    assert!(matches!(
        delete_table(&loc, "people"),
        Err(EditorError::TableNotFound(_))
    ));
}

#[test]
fn adds_column_with_default_for_existing_rows() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    add_column(&loc, "people", "city", SqlType::Text, Some("unknown")).unwrap();

    let city: String =
        query_one(&loc, "SELECT city FROM people WHERE name = 'Alice'");
    assert_eq!(city, "unknown");
}

#[test]
fn adds_column_without_default_as_null() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    add_column(&loc, "people", "note", SqlType::Text, None).unwrap();

    let note: Option<String> =
        query_one(&loc, "SELECT note FROM people WHERE name = 'Alice'");
    assert_eq!(note, None);
}

#[test]
fn removes_column_preserving_other_data() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    delete_column(&loc, "people", "age").unwrap();

    let cols = table_columns(&loc, "people").unwrap();
    let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name", "score"]);

    let count: i64 = query_one(&loc, "SELECT COUNT(*) FROM people");
    assert_eq!(count, 3);
    let score: f64 = query_one(&loc, "SELECT score FROM people WHERE name = 'Alice'");
    assert_eq!(score, 9.5);
}

#[test]
fn failed_column_removal_leaves_table_intact() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    // Occupying the rebuild's working name makes the copy step fail after
    // the transaction has started; the rollback must keep the original.
    let conn = Connection::open(loc.db_path()).unwrap();
    conn.execute_batch("CREATE TABLE people_temp (x TEXT);").unwrap();
    drop(conn);

    assert!(matches!(
        delete_column(&loc, "people", "age"),
        Err(EditorError::DatabaseError(_))
    ));

    let cols = table_columns(&loc, "people").unwrap();
    let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age", "score"]);

    let count: i64 = query_one(&loc, "SELECT COUNT(*) FROM people");
    assert_eq!(count, 3);
    let age: i64 = query_one(&loc, "SELECT age FROM people WHERE name = 'Alice'");
    assert_eq!(age, 30);
}

#[test]
fn refuses_to_remove_missing_or_last_column() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    assert!(matches!(
        delete_column(&loc, "people", "ghost"),
        Err(EditorError::ColumnNotFound { .. })
    ));

    delete_column(&loc, "people", "age").unwrap();
    delete_column(&loc, "people", "score").unwrap();
    assert!(matches!(
        delete_column(&loc, "people", "name"),
        Err(EditorError::LastColumn(_))
    ));
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn inserts_record_with_coerced_values() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    add_record(
        &loc,
        "people",
        &[
            ("name".to_string(), "Carol".to_string()),
            ("age".to_string(), "28".to_string()),
            ("score".to_string(), "".to_string()),
        ],
    )
    .unwrap();

    let age: i64 = query_one(&loc, "SELECT age FROM people WHERE name = 'Carol'");
    assert_eq!(age, 28);
    let score: Option<f64> =
        query_one(&loc, "SELECT score FROM people WHERE name = 'Carol'");
    assert_eq!(score, None);
}

#[test]
fn insert_keeps_unparseable_number_as_text() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    add_record(
        &loc,
        "people",
        &[
            ("name".to_string(), "Dave".to_string()),
            ("age".to_string(), "unknown".to_string()),
        ],
    )
    .unwrap();

    let age: String = query_one(&loc, "SELECT age FROM people WHERE name = 'Dave'");
    assert_eq!(age, "unknown");
}

#[test]
fn insert_rejects_unknown_column() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    let result = add_record(
        &loc,
        "people",
        &[("ghost".to_string(), "boo".to_string())],
    );
    assert!(matches!(result, Err(EditorError::ColumnNotFound { .. })));
}

#[test]
fn finds_records_by_filter() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    let rows = find_records(&loc, "people", &[("name".to_string(), "Bob".to_string())]).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0].as_deref(), Some("Bob"));

    let all = find_records(&loc, "people", &[]).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn deletes_matching_records() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    let deleted =
        delete_records(&loc, "people", &[("name".to_string(), "Bob".to_string())]).unwrap();
    assert_eq!(deleted, 2);

    let count: i64 = query_one(&loc, "SELECT COUNT(*) FROM people");
    assert_eq!(count, 1);
}

#[test]
fn delete_without_match_fails_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    assert!(matches!(
        delete_records(&loc, "people", &[("name".to_string(), "Zed".to_string())]),
        Err(EditorError::NoMatch)
    ));

    let count: i64 = query_one(&loc, "SELECT COUNT(*) FROM people");
    assert_eq!(count, 3);
}

#[test]
fn edits_first_matching_record_only() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    // Two rows are named Bob; only the first by rowid changes.
    let outcome = edit_record(&loc, "people", "name", "Bob", "age", "99").unwrap();
    assert_eq!(outcome.matched, 2);
    assert_eq!(outcome.updated, 1);

    let conn = Connection::open(loc.db_path()).unwrap();
    let ages: Vec<i64> = conn
        .prepare("SELECT age FROM people WHERE name = 'Bob' ORDER BY rowid")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(ages, vec![99, 40]);
}

#[test]
fn edit_coerces_against_declared_type() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    edit_record(&loc, "people", "name", "Alice", "score", "8").unwrap();
    let score: f64 = query_one(&loc, "SELECT score FROM people WHERE name = 'Alice'");
    assert_eq!(score, 8.0);

    edit_record(&loc, "people", "name", "Alice", "age", "").unwrap();
    let age: Option<i64> = query_one(&loc, "SELECT age FROM people WHERE name = 'Alice'");
    assert_eq!(age, None);
}

#[test]
fn edit_without_match_fails() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);

    assert!(matches!(
        edit_record(&loc, "people", "name", "Zed", "age", "1"),
        Err(EditorError::NoMatch)
    ));
}

// ---------------------------------------------------------------------------
// Session config
// ---------------------------------------------------------------------------

#[test]
fn session_config_round_trips_location() {
    let dir = TempDir::new().unwrap();
    let loc = people_db(&dir);
    let config_path = dir.path().join("session.yaml");

    SessionConfig::new(loc.clone()).save(&config_path).unwrap();
    let loaded = SessionConfig::load(&config_path).unwrap();
    assert_eq!(loaded.database, loc);

    // The restored location still opens the same database.
    assert_eq!(list_tables(&loaded.database).unwrap(), vec!["people"]);
}
