//! Statement dispatch.

use catwalk_ast::{ObjectName, Statement};
use catwalk_catalog::{DatabaseState, WalkThroughError};

use crate::{
    alter, create_index, create_table, database_ddl, drop_index, drop_table, rename_table,
    schema_ddl, view_ddl,
};

/// Apply one statement to the database state. On failure the state may
/// be partially modified; callers decide whether to keep going.
pub fn walk_statement(
    database: &mut DatabaseState,
    statement: &Statement,
) -> Result<(), WalkThroughError> {
    if database.deleted {
        let mut err = WalkThroughError::database_is_deleted(&database.name);
        err.line = statement.line();
        return Err(err);
    }

    tracing::debug!(line = statement.line(), "walking statement");

    let result = match statement {
        Statement::CreateTable(stmt) => create_table::apply(database, stmt),
        Statement::DropTable(stmt) => drop_table::apply(database, stmt),
        Statement::DropView(stmt) => view_ddl::apply_drop_view(database, stmt),
        Statement::AlterTable(stmt) => alter::apply(database, stmt),
        Statement::CreateIndex(stmt) => create_index::apply(database, stmt),
        Statement::DropIndex(stmt) => drop_index::apply(database, stmt),
        Statement::CreateDatabase(stmt) => database_ddl::apply_create(database, stmt),
        Statement::AlterDatabase(stmt) => database_ddl::apply_alter(database, stmt),
        Statement::DropDatabase(stmt) => database_ddl::apply_drop(database, stmt),
        Statement::RenameTable(stmt) => rename_table::apply(database, stmt),
        Statement::CreateSchema(stmt) => schema_ddl::apply_create(database, stmt),
        Statement::DropSchema(stmt) => schema_ddl::apply_drop(database, stmt),
    };

    result.map_err(|mut err| {
        if err.line == 0 {
            err.line = statement.line();
        }
        tracing::debug!(code = err.code.code(), line = err.line, "statement rejected");
        err
    })
}

/// Reject statements that reach across databases. The walk-through only
/// simulates the current one.
pub(crate) fn check_database_qualifier(
    database: &DatabaseState,
    name: &ObjectName,
) -> Result<(), WalkThroughError> {
    if let Some(target) = &name.database {
        if !database.is_current_database(target) {
            return Err(WalkThroughError::access_other_database(&database.name, target));
        }
    }
    Ok(())
}
