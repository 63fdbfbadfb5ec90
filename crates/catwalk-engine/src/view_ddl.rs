//! DROP VIEW.

use catwalk_ast::DropViewStmt;
use catwalk_catalog::{DatabaseState, WalkThroughError};

use crate::walk::check_database_qualifier;

pub(crate) fn apply_drop_view(
    database: &mut DatabaseState,
    stmt: &DropViewStmt,
) -> Result<(), WalkThroughError> {
    for target in &stmt.views {
        check_database_qualifier(database, target)?;
        let ctx = database.ctx;
        let Some(schema) = database.schema_mut(target.schema.as_deref()) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::schema_not_exists(
                    target.schema.as_deref().unwrap_or(ctx.rules().default_schema),
                ));
            }
            continue;
        };
        if schema.view(&target.name).is_none() {
            if stmt.if_exists || !ctx.check_integrity {
                continue;
            }
            return Err(WalkThroughError::table_not_exists(&target.name));
        }
        schema.drop_view(&target.name);
    }
    Ok(())
}
