//! Identifier comparison and folding policy.
//!
//! Every name lookup in the catalog routes through these functions instead
//! of map-native equality, because the same tree is shared across dialects
//! with different folding rules: MySQL-family table and database names fold
//! at comparison time (driven by the context flag), MySQL-family column and
//! index names fold at storage time, and PostgreSQL compares exactly.

/// Compare two identifiers under the active folding mode.
pub fn identifiers_equal(a: &str, b: &str, fold: bool) -> bool {
    if fold { a.eq_ignore_ascii_case(b) } else { a == b }
}

/// Fold an identifier for storage. MySQL folds to lowercase.
pub fn fold_identifier(name: &str, fold: bool) -> String {
    if fold { name.to_ascii_lowercase() } else { name.to_string() }
}

/// The base type name of a column type string: `varchar(20)` -> `varchar`,
/// `timestamp(6)` -> `timestamp`. Lowercased for rule-table lookups.
pub fn base_type(column_type: &str) -> String {
    let trimmed = column_type.trim();
    let end = trimmed
        .find(|c: char| c == '(' || c.is_whitespace())
        .unwrap_or(trimmed.len());
    trimmed[..end].to_ascii_lowercase()
}
