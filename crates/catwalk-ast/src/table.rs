use crate::{ColumnDef, ColumnPosition, ObjectName, TableConstraint};

/// CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStmt {
    pub name: ObjectName,
    pub if_not_exists: bool,
    /// CREATE TABLE ... AS SELECT, which the walk-through rejects.
    pub as_select: bool,
    /// CREATE TABLE ... LIKE other_table.
    pub like: Option<ObjectName>,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub line: usize,
}

/// DROP TABLE statement; may name several tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTableStmt {
    pub tables: Vec<ObjectName>,
    pub if_exists: bool,
    pub line: usize,
}

/// DROP VIEW statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropViewStmt {
    pub views: Vec<ObjectName>,
    pub if_exists: bool,
    pub line: usize,
}

/// ALTER TABLE statement: a target plus an ordered list of clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableStmt {
    pub table: ObjectName,
    pub actions: Vec<AlterTableAction>,
    pub line: usize,
}

/// One ALTER TABLE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableAction {
    /// ENGINE=/COMMENT=/COLLATE= table options.
    SetOption(TableOption),
    /// ADD COLUMN. `position` is only honored when a single column is added.
    AddColumns { columns: Vec<ColumnDef>, position: Option<ColumnPosition> },
    DropColumn { name: String, if_exists: bool },
    /// MODIFY COLUMN: redefine under the same name.
    ModifyColumn { definition: ColumnDef, position: Option<ColumnPosition> },
    /// CHANGE COLUMN: rename and redefine.
    ChangeColumn { old_name: String, definition: ColumnDef, position: Option<ColumnPosition> },
    RenameColumn { old_name: String, new_name: String },
    /// PostgreSQL ALTER COLUMN ... TYPE.
    AlterColumnType { name: String, column_type: String, collation: Option<String> },
    SetDefault { column: String, default: crate::DefaultClause },
    DropDefault { column: String },
    SetNotNull { column: String },
    DropNotNull { column: String },
    AddConstraint(TableConstraint),
    DropPrimaryKey,
    DropIndex { name: String },
    /// PostgreSQL DROP CONSTRAINT.
    DropConstraint { name: String },
    /// PostgreSQL RENAME CONSTRAINT.
    RenameConstraint { old_name: String, new_name: String },
    RenameTable { new_name: String },
    RenameIndex { old_name: String, new_name: String },
    SetIndexVisibility { index: String, visible: bool },
    /// PostgreSQL SET SCHEMA.
    SetSchema { new_schema: String },
}

/// A single table option in CREATE TABLE or ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    Engine(String),
    Collation(String),
    Comment(String),
}

/// RENAME TABLE a TO b [, c TO d ...].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTableStmt {
    pub pairs: Vec<RenamePair>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    pub from: ObjectName,
    pub to: ObjectName,
}
