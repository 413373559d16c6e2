//! Free-text → typed-value coercion.
//!
//! A single total function converts raw textual input into a [`Value`]
//! matching a column's declared type. The rules are explicit rather than
//! exception-driven:
//!
//! - empty input maps to NULL (no trimming is applied; whitespace is data)
//! - INTEGER and REAL columns attempt a parse and keep the original text
//!   when parsing fails
//! - TEXT and BLOB columns store the text verbatim
//!
//! The same rule applies everywhere a raw value enters the database (the
//! importer's bulk load, record insertion, record edits), so empty-string
//! handling is consistent across the whole tool.

use crate::types::{SqlType, Value};

/// Coerces a raw textual value against a declared column type.
///
/// Total: never fails. See the module docs for the fallback rules.
///
/// # Examples
///
/// ```
/// use csvlite_core::{coerce, SqlType, Value};
///
/// assert_eq!(coerce("30", SqlType::Integer), Value::Integer(30));
/// assert_eq!(coerce("", SqlType::Integer), Value::Null);
/// assert_eq!(coerce("3.5kg", SqlType::Real), Value::Text("3.5kg".into()));
/// ```
pub fn coerce(raw: &str, declared: SqlType) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match declared {
        SqlType::Integer => match raw.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Text(raw.to_string()),
        },
        SqlType::Real => match raw.parse::<f64>() {
            Ok(x) => Value::Real(x),
            Err(_) => Value::Text(raw.to_string()),
        },
        SqlType::Text | SqlType::Blob => Value::Text(raw.to_string()),
    }
}
