use crate::{IndexKey, ObjectName};

/// What kind of index a CREATE INDEX statement builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Plain,
    Unique,
    Fulltext,
    Spatial,
}

/// CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndexStmt {
    /// Empty name means the engine auto-generates one.
    pub name: Option<String>,
    pub table: ObjectName,
    pub kind: IndexKind,
    pub keys: Vec<IndexKey>,
    /// Index algorithm (`BTREE`, `HASH`, `gin`, ...).
    pub index_type: Option<String>,
    pub invisible: bool,
    pub if_not_exists: bool,
    pub line: usize,
}

/// DROP INDEX statement.
///
/// MySQL names the owning table (`DROP INDEX i ON t`); PostgreSQL names the
/// index alone, optionally schema-qualified, and the engine finds the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndexStmt {
    pub name: String,
    pub table: Option<ObjectName>,
    pub schema: Option<String>,
    pub if_exists: bool,
    pub line: usize,
}
