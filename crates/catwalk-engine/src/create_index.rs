//! CREATE INDEX.

use catwalk_ast::{CreateIndexStmt, IndexKind};
use catwalk_catalog::{DatabaseState, WalkThroughError};

use crate::constraints::{self, IndexSpec};
use crate::walk::check_database_qualifier;

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &CreateIndexStmt,
) -> Result<(), WalkThroughError> {
    check_database_qualifier(database, &stmt.table)?;
    let ctx = database.ctx;
    let schema = database.ensure_schema(stmt.table.schema.as_deref())?;
    let table_key = match schema.table_key(ctx, &stmt.table.name) {
        Some(key) => key,
        None => {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(&stmt.table.name));
            }
            schema.create_incomplete_table(&stmt.table.name);
            stmt.table.name.clone()
        }
    };

    let index_type = match stmt.kind {
        IndexKind::Fulltext => Some("FULLTEXT".to_string()),
        IndexKind::Spatial => Some("SPATIAL".to_string()),
        IndexKind::Plain | IndexKind::Unique => stmt.index_type.clone(),
    };
    constraints::create_index_on_table(
        ctx,
        schema,
        &table_key,
        IndexSpec {
            name: stmt.name.clone(),
            keys: &stmt.keys,
            unique: matches!(stmt.kind, IndexKind::Unique),
            index_type,
            visible: !stmt.invisible,
            is_constraint: false,
            if_not_exists: stmt.if_not_exists,
        },
    )
}
