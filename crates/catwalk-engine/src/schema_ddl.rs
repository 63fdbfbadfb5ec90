//! CREATE / DROP SCHEMA.

use catwalk_ast::{CreateSchemaStmt, DropSchemaStmt, Statement};
use catwalk_catalog::{DatabaseState, WalkThroughError};

pub(crate) fn apply_create(
    database: &mut DatabaseState,
    stmt: &CreateSchemaStmt,
) -> Result<(), WalkThroughError> {
    if database.has_schema(&stmt.name) {
        if stmt.if_not_exists {
            return Ok(());
        }
        return Err(WalkThroughError::schema_exists(&stmt.name));
    }
    database.create_schema(&stmt.name)?;

    // Nested elements live in the new schema when they are unqualified.
    for element in &stmt.elements {
        let qualified = qualify(element.clone(), &stmt.name);
        crate::walk::walk_statement(database, &qualified)?;
    }
    Ok(())
}

fn qualify(mut statement: Statement, schema: &str) -> Statement {
    match &mut statement {
        Statement::CreateTable(stmt) => {
            stmt.name.schema.get_or_insert_with(|| schema.to_string());
        }
        Statement::CreateIndex(stmt) => {
            stmt.table.schema.get_or_insert_with(|| schema.to_string());
        }
        _ => {}
    }
    statement
}

pub(crate) fn apply_drop(
    database: &mut DatabaseState,
    stmt: &DropSchemaStmt,
) -> Result<(), WalkThroughError> {
    for name in &stmt.schemas {
        if !database.has_schema(name) {
            if stmt.if_exists || !database.ctx.check_integrity {
                continue;
            }
            return Err(WalkThroughError::schema_not_exists(name));
        }
        database.remove_schema(name);
    }
    Ok(())
}
