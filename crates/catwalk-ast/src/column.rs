/// Column definition as written in CREATE TABLE or an ALTER TABLE clause.
///
/// Every attribute is optional: front-ends only set what the statement
/// actually spells out, so "unset" and "explicitly empty" stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDef {
    pub name: String,
    /// Normalized type text, e.g. `int`, `varchar(20)`, `timestamp(6)`.
    pub column_type: Option<String>,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    /// `Some(false)` for NOT NULL, `Some(true)` for an explicit NULL clause.
    pub nullable: Option<bool>,
    pub default: Option<DefaultClause>,
    /// `ON UPDATE CURRENT_TIMESTAMP` and friends.
    pub on_update_now: bool,
    pub auto_increment: bool,
    /// Inline `PRIMARY KEY` attribute.
    pub primary_key: bool,
    /// Inline `UNIQUE` attribute.
    pub unique: bool,
    pub comment: Option<String>,
    /// 1-based source line of the definition, for error attribution.
    pub line: usize,
}

impl ColumnDef {
    pub fn named(name: impl Into<String>) -> Self {
        ColumnDef { name: name.into(), ..Default::default() }
    }
}

/// A DEFAULT clause. `Null` is an explicit `DEFAULT NULL`, which is not the
/// same thing as having no default at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultClause {
    Null,
    Expression(String),
}

/// Requested position for an added or redefined column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPosition {
    First,
    After(String),
}
