//! DROP INDEX.
//!
//! Two syntactic families reach here: the MySQL form names the owning
//! table, the PostgreSQL form names the index alone and the engine
//! searches the schema for its owner.

use catwalk_ast::DropIndexStmt;
use catwalk_catalog::{DatabaseState, ErrorCode, WalkThroughError};

use crate::walk::check_database_qualifier;

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &DropIndexStmt,
) -> Result<(), WalkThroughError> {
    let ctx = database.ctx;

    if let Some(table_ref) = &stmt.table {
        check_database_qualifier(database, table_ref)?;
        let schema = database.ensure_schema(table_ref.schema.as_deref())?;
        let Some(table) = schema.table_mut(ctx, &table_ref.name) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(&table_ref.name));
            }
            return Ok(());
        };
        if let Some(removed) = table.drop_index(ctx, &stmt.name)? {
            schema.unregister_identifier(&removed.name);
        }
        return Ok(());
    }

    let schema = database.ensure_schema(stmt.schema.as_deref())?;
    let Some((table_key, index_key)) = schema.find_index(ctx, &stmt.name) else {
        if stmt.if_exists || !ctx.check_integrity {
            return Ok(());
        }
        return Err(WalkThroughError::new(
            ErrorCode::IndexNotExists,
            format!("Index \"{}\" does not exist in schema \"{}\"", stmt.name, schema.name),
        ));
    };
    if let Some(table) = schema.tables.get_mut(&table_key) {
        if let Some(removed) = table.drop_index(ctx, &index_key)? {
            schema.unregister_identifier(&removed.name);
        }
    }
    Ok(())
}
