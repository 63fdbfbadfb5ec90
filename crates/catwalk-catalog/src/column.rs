use std::collections::BTreeSet;

use crate::view::ViewRef;

/// Catalog state for one column of a table.
///
/// `position` is the 1-based ordinal within the owning table; the table
/// keeps the set of positions equal to `{1..column_count}` at all times.
/// `None` attributes mean "never stated", which is distinct from an
/// explicitly empty value; `nullable = None` marks a column fabricated
/// under lenient integrity, where the source script never told us.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    pub name: String,
    pub position: usize,
    pub column_type: Option<String>,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub default_value: Option<String>,
    pub nullable: Option<bool>,
    pub comment: Option<String>,
    /// Views that read this column. Populated when a snapshot carries
    /// dependency metadata; blocks destructive DDL against the column.
    pub dependent_views: BTreeSet<ViewRef>,
}

impl ColumnState {
    /// A placeholder for a column referenced before its definition was
    /// seen. Only the name is known.
    pub fn incomplete(name: impl Into<String>) -> Self {
        ColumnState {
            name: name.into(),
            position: 0,
            column_type: None,
            character_set: None,
            collation: None,
            default_value: None,
            nullable: None,
            comment: None,
            dependent_views: BTreeSet::new(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(true)
    }
}
