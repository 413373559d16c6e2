//! Identifier sanitation and validation for generated SQL.
//!
//! User CSV files and interactive input routinely contain names that are not
//! legal (or not safe) SQL identifiers. This module provides the shared
//! rules: sanitize free-form column headers, validate user-chosen names, and
//! quote identifiers when they are interpolated into generated statements.

/// Returns `true` when `name` is a strict SQL identifier:
/// `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Used for names the editor creates (tables, columns), where there is no
/// sanitation step and the name must be safe as-is.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `true` when `name` is acceptable as an import target table name:
/// non-empty, letters/digits/underscores/hyphens only.
///
/// The importer is deliberately more lenient than [`is_valid_identifier`]
/// (hyphens are tolerated) because the created table is always referenced
/// through quoted identifiers.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Sanitizes a raw column header for use as a SQL identifier.
///
/// Surrounding whitespace is stripped, every character outside
/// `[A-Za-z0-9_]` becomes `_`, and a header that ends up empty becomes
/// `column` so downstream de-duplication can still number it.
///
/// # Examples
///
/// ```
/// use csvlite_core::sanitize_column;
///
/// assert_eq!(sanitize_column(" First Name "), "First_Name");
/// assert_eq!(sanitize_column("price ($)"), "price____");
/// assert_eq!(sanitize_column(""), "column");
/// ```
pub fn sanitize_column(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "column".to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// De-duplicates sanitized column names, preserving order.
///
/// The first occurrence keeps its name; later collisions get `_1`, `_2`, …
/// appended. A suffixed name that itself collides keeps counting until it is
/// free.
///
/// # Examples
///
/// ```
/// use csvlite_core::dedup_columns;
///
/// let names = vec!["a".to_string(), "a".to_string(), "a_1".to_string()];
/// assert_eq!(dedup_columns(names), vec!["a", "a_1", "a_1_1"]);
/// ```
pub fn dedup_columns(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut counter = 1usize;
        loop {
            let candidate = format!("{name}_{counter}");
            if seen.insert(candidate.clone()) {
                out.push(candidate);
                break;
            }
            counter += 1;
        }
    }
    out
}

/// Quotes an identifier for interpolation into generated SQL.
///
/// Uses double quotes with `""` escaping, tolerating reserved words and any
/// characters that survived sanitation.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
