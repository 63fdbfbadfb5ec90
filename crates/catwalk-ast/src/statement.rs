use crate::{
    AlterDatabaseStmt, AlterTableStmt, CreateDatabaseStmt, CreateIndexStmt, CreateSchemaStmt,
    CreateTableStmt, DropDatabaseStmt, DropIndexStmt, DropSchemaStmt, DropTableStmt, DropViewStmt,
    RenameTableStmt,
};

/// A normalized DDL statement, one variant per walk-through operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTableStmt),
    DropTable(DropTableStmt),
    DropView(DropViewStmt),
    AlterTable(AlterTableStmt),
    CreateIndex(CreateIndexStmt),
    DropIndex(DropIndexStmt),
    CreateDatabase(CreateDatabaseStmt),
    AlterDatabase(AlterDatabaseStmt),
    DropDatabase(DropDatabaseStmt),
    RenameTable(RenameTableStmt),
    CreateSchema(CreateSchemaStmt),
    DropSchema(DropSchemaStmt),
}

impl Statement {
    /// 1-based source line of the statement, for error attribution.
    pub fn line(&self) -> usize {
        match self {
            Statement::CreateTable(s) => s.line,
            Statement::DropTable(s) => s.line,
            Statement::DropView(s) => s.line,
            Statement::AlterTable(s) => s.line,
            Statement::CreateIndex(s) => s.line,
            Statement::DropIndex(s) => s.line,
            Statement::CreateDatabase(s) => s.line,
            Statement::AlterDatabase(s) => s.line,
            Statement::DropDatabase(s) => s.line,
            Statement::RenameTable(s) => s.line,
            Statement::CreateSchema(s) => s.line,
            Statement::DropSchema(s) => s.line,
        }
    }
}
