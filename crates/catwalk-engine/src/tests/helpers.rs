//! Statement builders shared across the engine tests.

use catwalk_ast::{
    AlterTableAction, AlterTableStmt, ColumnDef, CreateIndexStmt, CreateTableStmt, DropTableStmt,
    IndexKey, IndexKind, ObjectName, Statement,
};
use catwalk_catalog::{EngineDialect, WalkThroughContext};

use crate::Catalog;

pub fn mysql_catalog() -> Catalog {
    Catalog::empty("shop", WalkThroughContext::new(EngineDialect::MySql, true, true))
}

pub fn pg_catalog() -> Catalog {
    Catalog::empty("shop", WalkThroughContext::new(EngineDialect::Postgres, true, false))
}

pub fn column(name: &str, column_type: &str) -> ColumnDef {
    let mut def = ColumnDef::named(name);
    def.column_type = Some(column_type.to_string());
    def
}

pub fn create_table(name: &str, columns: Vec<ColumnDef>) -> Statement {
    Statement::CreateTable(CreateTableStmt {
        name: ObjectName::bare(name),
        if_not_exists: false,
        as_select: false,
        like: None,
        columns,
        constraints: Vec::new(),
        line: 1,
    })
}

pub fn drop_table(name: &str) -> Statement {
    Statement::DropTable(DropTableStmt {
        tables: vec![ObjectName::bare(name)],
        if_exists: false,
        line: 1,
    })
}

pub fn alter_table(name: &str, actions: Vec<AlterTableAction>) -> Statement {
    Statement::AlterTable(AlterTableStmt { table: ObjectName::bare(name), actions, line: 1 })
}

pub fn create_index(name: Option<&str>, table: &str, keys: &[&str]) -> Statement {
    Statement::CreateIndex(CreateIndexStmt {
        name: name.map(str::to_string),
        table: ObjectName::bare(table),
        kind: IndexKind::Plain,
        keys: keys.iter().map(|key| IndexKey::Column(key.to_string())).collect(),
        index_type: None,
        invisible: false,
        if_not_exists: false,
        line: 1,
    })
}
