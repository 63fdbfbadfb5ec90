/// One key part of an index: either a plain column reference or a raw
/// expression. Order within the key list is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    Column(String),
    Expression(String),
}

impl IndexKey {
    /// The text stored in an index's expression list.
    pub fn text(&self) -> &str {
        match self {
            IndexKey::Column(name) => name,
            IndexKey::Expression(expr) => expr,
        }
    }
}

/// Table-level constraint definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConstraint {
    pub kind: TableConstraintKind,
    pub name: Option<String>,
    pub keys: Vec<IndexKey>,
    /// Index algorithm (`BTREE`, `HASH`, ...) when the statement names one.
    pub index_type: Option<String>,
    /// `INVISIBLE` index option.
    pub invisible: bool,
    /// PostgreSQL `... USING INDEX existing_index`.
    pub using_index: Option<String>,
    /// 1-based source line of the constraint clause.
    pub line: usize,
}

impl TableConstraint {
    pub fn new(kind: TableConstraintKind) -> Self {
        TableConstraint {
            kind,
            name: None,
            keys: Vec::new(),
            index_type: None,
            invisible: false,
            using_index: None,
            line: 0,
        }
    }
}

/// Constraint kinds the walk-through recognizes. Foreign keys and CHECK
/// constraints are parsed by front-ends but do not affect the structural
/// catalog, so the appliers skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableConstraintKind {
    PrimaryKey,
    /// PostgreSQL `PRIMARY KEY USING INDEX`.
    PrimaryKeyUsingIndex,
    Unique,
    /// PostgreSQL `UNIQUE USING INDEX`.
    UniqueUsingIndex,
    Index,
    Fulltext,
    Spatial,
    ForeignKey,
    Check,
}
