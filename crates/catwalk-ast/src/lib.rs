//! Normalized DDL statement trees
//!
//! This crate defines the dialect-neutral statement representation consumed
//! by the walk-through engine. Each SQL dialect's grammar front-end lowers
//! its own parse tree into these types; the state-transition logic is then
//! written once against them. Dialect-specific behavior (name folding,
//! default-value rules, namespace scoping) lives in the catalog's rule
//! tables, not here.

mod column;
mod constraint;
mod database;
mod index;
mod object_name;
mod schema;
mod statement;
mod table;

pub use column::{ColumnDef, ColumnPosition, DefaultClause};
pub use constraint::{IndexKey, TableConstraint, TableConstraintKind};
pub use database::{
    AlterDatabaseStmt, CreateDatabaseStmt, DatabaseOption, DropDatabaseStmt,
};
pub use index::{CreateIndexStmt, DropIndexStmt, IndexKind};
pub use object_name::ObjectName;
pub use schema::{CreateSchemaStmt, DropSchemaStmt};
pub use statement::Statement;
pub use table::{
    AlterTableAction, AlterTableStmt, CreateTableStmt, DropTableStmt, DropViewStmt,
    RenamePair, RenameTableStmt, TableOption,
};
