use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use csvlite_core::SqlType;
use csvlite_editor::{ColumnSpec, DbLocation, SessionConfig};
use csvlite_importer::{ImportRequest, import_csv};

#[derive(Debug, Parser)]
#[command(name = "csvlite")]
#[command(about = "CSV import and SQLite schema editing", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a CSV file into a table of a SQLite database.
    Import(ImportArgs),
    /// List the tables of a database.
    Tables(TablesArgs),
    /// List the columns of a table.
    Columns(ColumnsArgs),
    /// Create a new table.
    AddTable(AddTableArgs),
    /// Drop a table and all of its records.
    DropTable(DropTableArgs),
    /// Add a column to a table.
    AddColumn(AddColumnArgs),
    /// Remove a column from a table, keeping all other data.
    DropColumn(DropColumnArgs),
    /// Insert a record into a table.
    Insert(InsertArgs),
    /// Delete the records matching the given filters.
    Delete(DeleteArgs),
    /// Update one field of one record.
    Update(UpdateArgs),
}

/// Where the database lives. Given either explicitly (`--db-dir` plus
/// `--db-name`) or through a session config file from a previous run.
#[derive(Debug, Args)]
struct LocationArgs {
    /// Directory containing the database file.
    #[arg(long)]
    db_dir: Option<PathBuf>,
    /// Database file name (`.db` appended when absent).
    #[arg(long)]
    db_name: Option<String>,
    /// Session config YAML remembering the database location.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl LocationArgs {
    /// Resolves the database location, preferring explicit arguments over
    /// the session config. When both an explicit location and `--config`
    /// are given, the location is saved to the config for later runs.
    fn resolve(&self) -> Result<DbLocation, String> {
        match (&self.db_dir, &self.db_name) {
            (Some(dir), Some(name)) => {
                let location = DbLocation::new(dir, name.clone());
                if let Some(config) = &self.config {
                    SessionConfig::new(location.clone())
                        .save(config)
                        .map_err(|err| {
                            format!("Failed to save session config '{}': {err}", config.display())
                        })?;
                }
                Ok(location)
            }
            (None, None) => {
                let config = self.config.as_ref().ok_or_else(|| {
                    "Specify the database with --db-dir and --db-name, or --config".to_string()
                })?;
                let session = SessionConfig::load(config).map_err(|err| {
                    format!("Failed to load session config '{}': {err}", config.display())
                })?;
                Ok(session.database)
            }
            _ => Err("--db-dir and --db-name must be given together".to_string()),
        }
    }
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Path of the source CSV file.
    #[arg(long)]
    csv: PathBuf,
    /// Directory the database file is created in (created if missing).
    #[arg(long)]
    dest: PathBuf,
    /// Database file name (`.db` appended when absent).
    #[arg(long)]
    db: String,
    /// Name of the table to create, replacing any existing one.
    #[arg(long)]
    table: String,
    /// Print the import summary as JSON instead of a sentence.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TablesArgs {
    #[command(flatten)]
    location: LocationArgs,
}

#[derive(Debug, Args)]
struct ColumnsArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to describe.
    table: String,
}

#[derive(Debug, Args)]
struct AddTableArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to create.
    table: String,
    /// Column as `name:TYPE` (TYPE is TEXT, INTEGER, REAL, or BLOB). Repeatable.
    #[arg(long = "column", required = true)]
    columns: Vec<String>,
    /// Name of the column to declare as primary key.
    #[arg(long)]
    primary_key: Option<String>,
}

#[derive(Debug, Args)]
struct DropTableArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to drop.
    table: String,
    /// Confirm the drop; without it nothing is changed.
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct AddColumnArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to alter.
    table: String,
    /// Column to add.
    column: String,
    /// Column type (TEXT, INTEGER, REAL, or BLOB).
    #[arg(long = "type", default_value = "TEXT")]
    sql_type: String,
    /// Value existing rows receive in the new column (NULL when omitted).
    #[arg(long)]
    default: Option<String>,
}

#[derive(Debug, Args)]
struct DropColumnArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to alter.
    table: String,
    /// Column to remove.
    column: String,
    /// Confirm the removal; without it nothing is changed.
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct InsertArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to insert into.
    table: String,
    /// Field as `column=value`. Repeatable; an empty value stores NULL.
    #[arg(long = "set", required = true)]
    sets: Vec<String>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to delete from.
    table: String,
    /// Filter as `column=value`; rows matching all filters are deleted. Repeatable.
    #[arg(long = "where", required = true)]
    filters: Vec<String>,
    /// Confirm the deletion; without it the matching rows are only listed.
    #[arg(long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[command(flatten)]
    location: LocationArgs,
    /// Table to update.
    table: String,
    /// Selection as `column=value`; the first matching row is updated.
    #[arg(long = "where")]
    filter: String,
    /// New field value as `column=value`.
    #[arg(long = "set")]
    set: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Import(args) => run_import(args),
        Command::Tables(args) => run_tables(args),
        Command::Columns(args) => run_columns(args),
        Command::AddTable(args) => run_add_table(args),
        Command::DropTable(args) => run_drop_table(args),
        Command::AddColumn(args) => run_add_column(args),
        Command::DropColumn(args) => run_drop_column(args),
        Command::Insert(args) => run_insert(args),
        Command::Delete(args) => run_delete(args),
        Command::Update(args) => run_update(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_import(args: ImportArgs) -> Result<(), String> {
    let request = ImportRequest::new(&args.csv, &args.dest, args.db, args.table);
    let summary = import_csv(&request).map_err(|e| e.to_string())?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|err| format!("Failed to serialize summary: {err}"))?;
        println!("{json}");
    } else {
        println!(
            "Imported {} row(s) x {} column(s) into table '{}' of '{}'.",
            summary.rows,
            summary.columns,
            summary.table,
            summary.db_path.display()
        );
    }
    Ok(())
}

fn run_tables(args: TablesArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let tables = csvlite_editor::list_tables(&location).map_err(|e| e.to_string())?;

    if tables.is_empty() {
        println!("No tables in '{}'.", location.db_path().display());
    } else {
        for table in tables {
            println!("{table}");
        }
    }
    Ok(())
}

fn run_columns(args: ColumnsArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let columns =
        csvlite_editor::table_columns(&location, &args.table).map_err(|e| e.to_string())?;

    for column in columns {
        let key = if column.primary_key { "  PRIMARY KEY" } else { "" };
        println!("{}  {}{key}", column.name, column.declared_type);
    }
    Ok(())
}

fn run_add_table(args: AddTableArgs) -> Result<(), String> {
    let location = args.location.resolve()?;

    let mut columns = Vec::with_capacity(args.columns.len());
    for raw in &args.columns {
        let mut spec = parse_column_spec(raw)?;
        if args.primary_key.as_deref() == Some(spec.name.as_str()) {
            spec = spec.primary_key();
        }
        columns.push(spec);
    }
    if let Some(key) = &args.primary_key {
        if !columns.iter().any(|c| &c.name == key) {
            return Err(format!("--primary-key '{key}' is not among the given columns"));
        }
    }

    csvlite_editor::add_table(&location, &args.table, &columns).map_err(|e| e.to_string())?;
    println!(
        "Created table '{}' with {} column(s).",
        args.table,
        columns.len()
    );
    Ok(())
}

fn run_drop_table(args: DropTableArgs) -> Result<(), String> {
    let location = args.location.resolve()?;

    if !args.yes {
        return Err(format!(
            "Dropping table '{}' removes all of its records. Re-run with --yes to confirm.",
            args.table
        ));
    }

    csvlite_editor::delete_table(&location, &args.table).map_err(|e| e.to_string())?;
    println!("Dropped table '{}'.", args.table);
    Ok(())
}

fn run_add_column(args: AddColumnArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let sql_type = parse_sql_type(&args.sql_type)?;

    csvlite_editor::add_column(
        &location,
        &args.table,
        &args.column,
        sql_type,
        args.default.as_deref(),
    )
    .map_err(|e| e.to_string())?;
    println!("Added column '{}' to table '{}'.", args.column, args.table);
    Ok(())
}

fn run_drop_column(args: DropColumnArgs) -> Result<(), String> {
    let location = args.location.resolve()?;

    if !args.yes {
        return Err(format!(
            "Removing column '{}' discards its data in every row of '{}'. Re-run with --yes to confirm.",
            args.column, args.table
        ));
    }

    csvlite_editor::delete_column(&location, &args.table, &args.column)
        .map_err(|e| e.to_string())?;
    println!(
        "Removed column '{}' from table '{}'.",
        args.column, args.table
    );
    Ok(())
}

fn run_insert(args: InsertArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let values = parse_assignments(&args.sets)?;

    csvlite_editor::add_record(&location, &args.table, &values).map_err(|e| e.to_string())?;
    println!("Inserted 1 record into table '{}'.", args.table);
    Ok(())
}

fn run_delete(args: DeleteArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let filters = parse_assignments(&args.filters)?;

    if !args.yes {
        // Preview pass: list what would be deleted, change nothing.
        let rows = csvlite_editor::find_records(&location, &args.table, &filters)
            .map_err(|e| e.to_string())?;
        if rows.is_empty() {
            return Err("no records match the given criteria".to_string());
        }
        println!(
            "{} record(s) would be deleted from table '{}':",
            rows.len(),
            args.table
        );
        for row in &rows {
            println!("  {}", render_row(row));
        }
        println!("Re-run with --yes to delete them.");
        return Ok(());
    }

    let deleted = csvlite_editor::delete_records(&location, &args.table, &filters)
        .map_err(|e| e.to_string())?;
    println!("Deleted {deleted} record(s) from table '{}'.", args.table);
    Ok(())
}

fn run_update(args: UpdateArgs) -> Result<(), String> {
    let location = args.location.resolve()?;
    let (where_column, where_value) = parse_assignment(&args.filter)?;
    let (edit_column, new_value) = parse_assignment(&args.set)?;

    let outcome = csvlite_editor::edit_record(
        &location,
        &args.table,
        &where_column,
        &where_value,
        &edit_column,
        &new_value,
    )
    .map_err(|e| e.to_string())?;

    if outcome.matched > 1 {
        println!(
            "{} record(s) matched; updated the first one only.",
            outcome.matched
        );
    } else {
        println!("Updated 1 record in table '{}'.", args.table);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

/// Parses `name:TYPE` into a column spec. A bare `name` defaults to TEXT.
fn parse_column_spec(raw: &str) -> Result<ColumnSpec, String> {
    match raw.split_once(':') {
        Some((name, type_name)) => Ok(ColumnSpec::new(name, parse_sql_type(type_name)?)),
        None => {
            if raw.is_empty() {
                Err("column spec must not be empty".to_string())
            } else {
                Ok(ColumnSpec::new(raw, SqlType::Text))
            }
        }
    }
}

fn parse_sql_type(name: &str) -> Result<SqlType, String> {
    SqlType::parse(name)
        .ok_or_else(|| format!("unknown type '{name}': expected TEXT, INTEGER, REAL, or BLOB"))
}

/// Parses `column=value`. The value may contain further `=` characters.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got '{raw}'"))?;
    if column.is_empty() {
        return Err(format!("expected column=value, got '{raw}'"));
    }
    Ok((column.to_string(), value.to_string()))
}

fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    raw.iter().map(|s| parse_assignment(s)).collect()
}

fn render_row(row: &[Option<String>]) -> String {
    row.iter()
        .map(|cell| cell.as_deref().unwrap_or("NULL"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_spec() {
        let spec = parse_column_spec("age:INTEGER").unwrap();
        assert_eq!(spec.name, "age");
        assert_eq!(spec.sql_type, SqlType::Integer);

        let spec = parse_column_spec("note").unwrap();
        assert_eq!(spec.sql_type, SqlType::Text);

        assert!(parse_column_spec("x:JSON").is_err());
        assert!(parse_column_spec("").is_err());
    }

    #[test]
    fn test_parse_assignment_splits_on_first_equals() {
        let (column, value) = parse_assignment("note=a=b").unwrap();
        assert_eq!(column, "note");
        assert_eq!(value, "a=b");

        let (_, value) = parse_assignment("age=").unwrap();
        assert_eq!(value, "");

        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_render_row_shows_null() {
        let row = vec![Some("Alice".to_string()), None];
        assert_eq!(render_row(&row), "Alice | NULL");
    }
}
