//! Shared type definitions for schema inference and editing.
//!
//! This module defines the core data model used by both the importer and the
//! schema editor: declared SQLite column types, the value kinds observed in
//! source data, and the typed values produced by coercion. The types are
//! designed for serialization with [`serde`] so summaries and schemas can
//! round-trip through JSON output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared SQLite column type.
///
/// The importer only ever infers `Integer`, `Real`, or `Text`; `Blob` exists
/// because the schema editor lets callers create columns of any of SQLite's
/// storage classes.
///
/// # Examples
///
/// ```
/// use csvlite_core::SqlType;
///
/// assert_eq!(SqlType::Integer.as_sql(), "INTEGER");
/// assert_eq!(SqlType::from_declared("int"), SqlType::Integer);
/// assert_eq!(SqlType::from_declared("VARCHAR(40)"), SqlType::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SqlType {
    /// 64-bit signed integer storage.
    Integer,
    /// 8-byte IEEE floating point storage.
    Real,
    /// UTF-8 text storage (the default and the fallback).
    #[default]
    Text,
    /// Raw byte storage. Never inferred; editor-created columns only.
    Blob,
}

impl SqlType {
    /// Returns the SQL keyword used in generated DDL.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
        }
    }

    /// Maps a declared-type string (as reported by `PRAGMA table_info`) back
    /// to a [`SqlType`].
    ///
    /// Follows SQLite's own affinity spirit: any type mentioning `INT` is
    /// integer, the common floating-point names are real, `BLOB` is blob,
    /// and everything else (including empty declarations) is text.
    pub fn from_declared(declared: &str) -> SqlType {
        let upper = declared.trim().to_ascii_uppercase();
        if upper.contains("INT") {
            SqlType::Integer
        } else if upper == "REAL" || upper == "FLOAT" || upper == "DOUBLE" {
            SqlType::Real
        } else if upper == "BLOB" {
            SqlType::Blob
        } else {
            SqlType::Text
        }
    }

    /// Parses a user-supplied type name (`TEXT`, `INTEGER`, `REAL`, `BLOB`).
    ///
    /// Returns `None` for anything outside that set; callers decide whether
    /// to reject or default to text.
    pub fn parse(name: &str) -> Option<SqlType> {
        match name.trim().to_ascii_uppercase().as_str() {
            "INTEGER" | "INT" => Some(SqlType::Integer),
            "REAL" | "FLOAT" | "DOUBLE" => Some(SqlType::Real),
            "TEXT" => Some(SqlType::Text),
            "BLOB" => Some(SqlType::Blob),
            _ => None,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Kind of value observed in a source-data column.
///
/// Produced by the importer's per-column scan and mapped to a [`SqlType`]
/// with [`sql_type_for`], the fixed mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Every non-empty value is `true`/`false` (case-insensitive).
    Boolean,
    /// Every non-empty value parses as a whole number.
    Integer,
    /// Every non-empty value parses as a floating-point number.
    Float,
    /// Every non-empty value parses as an ISO date or date-time.
    Temporal,
    /// Anything else.
    Text,
}

/// The fixed value-kind → column-type mapping table.
///
/// Whole-number and boolean kinds become INTEGER, floating-point kinds
/// become REAL, and textual/temporal kinds become TEXT.
///
/// # Examples
///
/// ```
/// use csvlite_core::{sql_type_for, SqlType, ValueKind};
///
/// assert_eq!(sql_type_for(ValueKind::Boolean), SqlType::Integer);
/// assert_eq!(sql_type_for(ValueKind::Temporal), SqlType::Text);
/// ```
pub fn sql_type_for(kind: ValueKind) -> SqlType {
    match kind {
        ValueKind::Boolean | ValueKind::Integer => SqlType::Integer,
        ValueKind::Float => SqlType::Real,
        ValueKind::Temporal | ValueKind::Text => SqlType::Text,
    }
}

/// One column of an inferred or user-defined schema, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Sanitized column name, safe for use as a quoted SQL identifier.
    pub name: String,
    /// Declared SQLite type.
    pub sql_type: SqlType,
}

impl ColumnDef {
    /// Creates a column definition.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

/// A typed value ready to be bound as a SQL parameter.
///
/// Produced by [`coerce`](crate::coerce); never interpolated into SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL (from an empty input).
    Null,
    /// An integer that parsed cleanly.
    Integer(i64),
    /// A float that parsed cleanly.
    Real(f64),
    /// Text, either declared as such or kept verbatim after a failed parse.
    Text(String),
}

impl Value {
    /// Renders the value the way a preview or log line would show it.
    ///
    /// `None` means SQL NULL.
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Integer(n) => Some(n.to_string()),
            Value::Real(x) => Some(x.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_display_matches_keyword() {
        assert_eq!(SqlType::Integer.to_string(), "INTEGER");
        assert_eq!(SqlType::Real.to_string(), "REAL");
        assert_eq!(SqlType::Text.to_string(), "TEXT");
        assert_eq!(SqlType::Blob.to_string(), "BLOB");
    }

    #[test]
    fn test_from_declared_covers_common_names() {
        assert_eq!(SqlType::from_declared("INTEGER"), SqlType::Integer);
        assert_eq!(SqlType::from_declared("int"), SqlType::Integer);
        assert_eq!(SqlType::from_declared("BIGINT"), SqlType::Integer);
        assert_eq!(SqlType::from_declared("REAL"), SqlType::Real);
        assert_eq!(SqlType::from_declared("double"), SqlType::Real);
        assert_eq!(SqlType::from_declared("BLOB"), SqlType::Blob);
        assert_eq!(SqlType::from_declared("VARCHAR(255)"), SqlType::Text);
        assert_eq!(SqlType::from_declared(""), SqlType::Text);
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_eq!(SqlType::parse("integer"), Some(SqlType::Integer));
        assert_eq!(SqlType::parse(" REAL "), Some(SqlType::Real));
        assert_eq!(SqlType::parse("JSON"), None);
        assert_eq!(SqlType::parse(""), None);
    }

    #[test]
    fn test_mapping_table() {
        assert_eq!(sql_type_for(ValueKind::Integer), SqlType::Integer);
        assert_eq!(sql_type_for(ValueKind::Boolean), SqlType::Integer);
        assert_eq!(sql_type_for(ValueKind::Float), SqlType::Real);
        assert_eq!(sql_type_for(ValueKind::Temporal), SqlType::Text);
        assert_eq!(sql_type_for(ValueKind::Text), SqlType::Text);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.display(), None);
        assert_eq!(Value::Integer(42).display(), Some("42".to_string()));
        assert_eq!(Value::Text("x".into()).display(), Some("x".to_string()));
    }
}
