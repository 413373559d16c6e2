//! CSV → SQLite import pipeline.
//!
//! This crate converts a single CSV file into a table of a SQLite database:
//! it decodes the file (with a fixed encoding fallback list), parses it,
//! sanitizes column names, infers a best-effort schema, replaces the target
//! table, bulk-loads the rows in one transaction, and verifies the committed
//! row count.
//!
//! # Quick start
//!
//! ```no_run
//! use csvlite_importer::{ImportRequest, import_csv};
//!
//! let request = ImportRequest::new("people.csv", "data/", "people", "people");
//! let summary = import_csv(&request).unwrap();
//! println!(
//!     "wrote {} rows x {} columns to {}",
//!     summary.rows,
//!     summary.columns,
//!     summary.db_path.display()
//! );
//! ```
//!
//! # Error taxonomy
//!
//! Every failure is one variant of [`ImportError`]; raw engine errors are
//! wrapped, and the database connection is released on every exit path.

mod decode;
mod error;
mod import;
mod infer;

pub use error::{ImportError, Result};
pub use import::{ImportRequest, ImportSummary, import_csv, resolve_db_path};
pub use infer::{infer_schema, infer_value_kind};
