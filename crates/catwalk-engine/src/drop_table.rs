//! DROP TABLE.

use catwalk_ast::DropTableStmt;
use catwalk_catalog::{DatabaseState, WalkThroughError};

use crate::walk::check_database_qualifier;

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &DropTableStmt,
) -> Result<(), WalkThroughError> {
    for target in &stmt.tables {
        check_database_qualifier(database, target)?;
        let ctx = database.ctx;

        // Read phase: find the table and collect any views still reading
        // from it before touching state.
        let schema_name = {
            let Some(schema) = database.schema(target.schema.as_deref()) else {
                if ctx.check_integrity {
                    return Err(WalkThroughError::schema_not_exists(
                        target.schema.as_deref().unwrap_or(ctx.rules().default_schema),
                    ));
                }
                continue;
            };
            let Some(table) = schema.table(ctx, &target.name) else {
                if stmt.if_exists || !ctx.check_integrity {
                    continue;
                }
                return Err(WalkThroughError::table_not_exists(&target.name));
            };
            let blocking = database.existing_views(&table.dependent_views);
            if !blocking.is_empty() {
                return Err(WalkThroughError::table_referenced_by_views(
                    &schema.name,
                    &table.name,
                    &blocking,
                ));
            }
            schema.name.clone()
        };

        if let Some(schema) = database.schemas.get_mut(&schema_name) {
            schema.drop_table(ctx, &target.name)?;
        }
    }
    Ok(())
}
