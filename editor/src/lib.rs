//! Schema and record editing for SQLite databases.
//!
//! This crate is the editing half of csvlite: once a database exists (for
//! example after a CSV import), it lists tables and columns, creates and
//! drops tables, adds and removes columns, and inserts, finds, deletes, and
//! edits records.
//!
//! Every operation takes a [`DbLocation`] and opens its own short-lived
//! connection; nothing is held between calls. A [`SessionConfig`] can
//! persist the location between invocations as a small YAML file.
//!
//! ```no_run
//! use csvlite_editor::{DbLocation, list_tables};
//!
//! let loc = DbLocation::new("data/", "inventory");
//! for table in list_tables(&loc).unwrap() {
//!     println!("{table}");
//! }
//! ```

mod catalog;
mod config;
mod error;
mod location;
mod records;
mod tables;

pub use catalog::{ColumnInfo, list_tables, table_columns};
pub use config::SessionConfig;
pub use error::{EditorError, Result};
pub use location::DbLocation;
pub use records::{EditOutcome, add_record, delete_records, edit_record, find_records};
pub use tables::{ColumnSpec, add_column, add_table, delete_column, delete_table};
