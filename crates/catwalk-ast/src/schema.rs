use crate::Statement;

/// PostgreSQL CREATE SCHEMA, optionally with nested element statements
/// (`CREATE SCHEMA s CREATE TABLE t (...)`).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchemaStmt {
    pub name: String,
    pub if_not_exists: bool,
    pub elements: Vec<Statement>,
    pub line: usize,
}

/// PostgreSQL DROP SCHEMA.
#[derive(Debug, Clone, PartialEq)]
pub struct DropSchemaStmt {
    pub schemas: Vec<String>,
    pub if_exists: bool,
    pub line: usize,
}
