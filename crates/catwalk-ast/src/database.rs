/// CREATE DATABASE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseStmt {
    pub name: String,
    pub if_not_exists: bool,
    pub line: usize,
}

/// ALTER DATABASE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterDatabaseStmt {
    /// Empty when the statement targets the default (current) database.
    pub name: Option<String>,
    pub options: Vec<DatabaseOption>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseOption {
    CharacterSet(String),
    Collation(String),
}

/// DROP DATABASE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDatabaseStmt {
    pub name: String,
    pub if_exists: bool,
    pub line: usize,
}
