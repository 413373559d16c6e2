//! Best-effort column type inference.
//!
//! Each column's non-empty values are scanned to decide a [`ValueKind`],
//! which the fixed mapping table in `csvlite-core` turns into a column type.
//! Empty cells are NULLs and never influence the decision, so a column of
//! `"30"` and `""` still infers INTEGER.
//!
//! Values are examined exactly as they appear in the file, with no trimming,
//! which keeps inference consistent with the coercion rules applied at
//! insert time.

use chrono::{NaiveDate, NaiveDateTime};
use csvlite_core::{ColumnDef, ValueKind, sql_type_for};

/// Date-time layouts accepted for the temporal kind, besides plain ISO dates.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

fn is_temporal(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

/// Decides the value kind of one column from its raw values.
///
/// Empty values are skipped. A column with no non-empty values is
/// [`ValueKind::Text`].
pub fn infer_value_kind<'a>(values: impl Iterator<Item = &'a str>) -> ValueKind {
    let mut saw_any = false;
    let mut all_bool = true;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_temporal = true;

    for value in values {
        if value.is_empty() {
            continue;
        }
        saw_any = true;
        all_bool = all_bool && is_boolean(value);
        all_int = all_int && value.parse::<i64>().is_ok();
        all_float = all_float && value.parse::<f64>().is_ok();
        all_temporal = all_temporal && is_temporal(value);
        if !(all_bool || all_int || all_float || all_temporal) {
            return ValueKind::Text;
        }
    }

    if !saw_any {
        return ValueKind::Text;
    }
    if all_bool {
        ValueKind::Boolean
    } else if all_int {
        ValueKind::Integer
    } else if all_float {
        ValueKind::Float
    } else if all_temporal {
        ValueKind::Temporal
    } else {
        ValueKind::Text
    }
}

/// Infers the destination schema for sanitized headers and parsed rows.
///
/// Column order follows the header order. Rows shorter than the header list
/// (not produced by the strict parser, but tolerated here) count as empty
/// cells for the missing columns.
pub fn infer_schema(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnDef> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let kind = infer_value_kind(
                rows.iter()
                    .map(|row| row.get(idx).map(String::as_str).unwrap_or("")),
            );
            ColumnDef::new(header.clone(), sql_type_for(kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvlite_core::SqlType;

    fn kind_of(values: &[&str]) -> ValueKind {
        infer_value_kind(values.iter().copied())
    }

    #[test]
    fn test_integer_column() {
        assert_eq!(kind_of(&["1", "42", "-7"]), ValueKind::Integer);
    }

    #[test]
    fn test_empty_cells_do_not_demote_integers() {
        assert_eq!(kind_of(&["30", "", "12"]), ValueKind::Integer);
    }

    #[test]
    fn test_float_column() {
        assert_eq!(kind_of(&["1.5", "2", "-0.25"]), ValueKind::Float);
    }

    #[test]
    fn test_boolean_column() {
        assert_eq!(kind_of(&["true", "FALSE", "True"]), ValueKind::Boolean);
    }

    #[test]
    fn test_temporal_column() {
        assert_eq!(
            kind_of(&["2024-01-15", "2023-12-31"]),
            ValueKind::Temporal
        );
        assert_eq!(
            kind_of(&["2024-01-15 10:30:00", "2024-01-15T10:30:00"]),
            ValueKind::Temporal
        );
    }

    #[test]
    fn test_mixed_column_is_text() {
        assert_eq!(kind_of(&["1", "two"]), ValueKind::Text);
        assert_eq!(kind_of(&["2024-01-15", "soon"]), ValueKind::Text);
    }

    #[test]
    fn test_all_empty_column_is_text() {
        assert_eq!(kind_of(&["", "", ""]), ValueKind::Text);
        assert_eq!(kind_of(&[]), ValueKind::Text);
    }

    #[test]
    fn test_untrimmed_numerics_are_text() {
        // Whitespace is data; " 30" does not parse and the column stays TEXT,
        // matching what coercion will do at insert time.
        assert_eq!(kind_of(&[" 30", "12"]), ValueKind::Text);
    }

    #[test]
    fn test_infer_schema_maps_kinds_to_types() {
        let headers = vec!["Name".to_string(), "Age".to_string(), "Score".to_string()];
        let rows = vec![
            vec!["Alice".to_string(), "30".to_string(), "9.5".to_string()],
            vec!["Bob".to_string(), "".to_string(), "7".to_string()],
        ];
        let schema = infer_schema(&headers, &rows);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema[0].sql_type, SqlType::Text);
        assert_eq!(schema[1].sql_type, SqlType::Integer);
        assert_eq!(schema[2].sql_type, SqlType::Real);
    }
}
