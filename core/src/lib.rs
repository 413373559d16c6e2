//! Core types and shared rules for CSV → SQLite conversion.
//!
//! This crate defines the foundational pieces used by the importer and the
//! schema editor:
//!
//! - [`SqlType`]: declared SQLite column types, with parsing from
//!   `PRAGMA table_info` declarations and user input.
//! - [`ValueKind`] / [`sql_type_for`]: observed per-column value kinds and
//!   the fixed mapping table that turns them into column types.
//! - [`ColumnDef`]: one entry of an inferred schema, in source order.
//! - [`Value`] / [`coerce`]: typed parameter values and the total
//!   text-to-value coercion function.
//! - Identifier helpers ([`sanitize_column`], [`dedup_columns`],
//!   [`quote_ident`], validation predicates) shared by everything that
//!   generates SQL.
//!
//! # Example
//!
//! ```
//! use csvlite_core::*;
//!
//! let header = sanitize_column("First Name!");
//! assert_eq!(header, "First_Name_");
//!
//! assert_eq!(sql_type_for(ValueKind::Integer), SqlType::Integer);
//! assert_eq!(coerce("", SqlType::Integer), Value::Null);
//! ```

mod coerce;
mod identifier;
mod types;

pub use coerce::coerce;
pub use identifier::{
    dedup_columns, is_valid_identifier, is_valid_table_name, quote_ident, sanitize_column,
};
pub use types::{ColumnDef, SqlType, Value, ValueKind, sql_type_for};
