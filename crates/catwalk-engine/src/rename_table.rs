//! RENAME TABLE a TO b [, ...].
//!
//! Pairs may reach across databases even though only one is simulated:
//! renaming away is a local drop, renaming in fabricates a placeholder
//! when integrity allows it, and a pair touching two foreign databases
//! is out of reach entirely.

use catwalk_ast::{ObjectName, RenamePair, RenameTableStmt};
use catwalk_catalog::{DatabaseState, WalkThroughError};

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &RenameTableStmt,
) -> Result<(), WalkThroughError> {
    for pair in &stmt.pairs {
        apply_pair(database, pair)?;
    }
    Ok(())
}

fn is_current(database: &DatabaseState, name: &ObjectName) -> bool {
    name.database
        .as_deref()
        .map_or(true, |qualifier| database.is_current_database(qualifier))
}

fn apply_pair(database: &mut DatabaseState, pair: &RenamePair) -> Result<(), WalkThroughError> {
    let ctx = database.ctx;
    match (is_current(database, &pair.from), is_current(database, &pair.to)) {
        (true, true) => {
            let schema = database.ensure_schema(pair.from.schema.as_deref())?;
            schema.rename_table(ctx, &pair.from.name, &pair.to.name)
        }
        // Moving away: the table leaves the simulated database.
        (true, false) => {
            let schema = database.ensure_schema(pair.from.schema.as_deref())?;
            schema.drop_table(ctx, &pair.from.name)?;
            Ok(())
        }
        // Moving in: the source is invisible to the simulation.
        (false, true) => {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(&pair.from.name));
            }
            let schema = database.ensure_schema(pair.to.schema.as_deref())?;
            schema.create_incomplete_table(&pair.to.name);
            Ok(())
        }
        (false, false) => Err(WalkThroughError::access_other_database(
            &database.name,
            pair.from.database.as_deref().unwrap_or_default(),
        )),
    }
}
