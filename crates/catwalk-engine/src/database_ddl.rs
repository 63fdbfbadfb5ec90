//! CREATE / ALTER / DROP DATABASE.
//!
//! The walk-through simulates exactly one database, so CREATE DATABASE
//! is always out of reach and ALTER/DROP must name the current one.

use catwalk_ast::{AlterDatabaseStmt, CreateDatabaseStmt, DatabaseOption, DropDatabaseStmt};
use catwalk_catalog::{DatabaseState, WalkThroughError};

pub(crate) fn apply_create(
    database: &mut DatabaseState,
    stmt: &CreateDatabaseStmt,
) -> Result<(), WalkThroughError> {
    Err(WalkThroughError::access_other_database(&database.name, &stmt.name))
}

pub(crate) fn apply_alter(
    database: &mut DatabaseState,
    stmt: &AlterDatabaseStmt,
) -> Result<(), WalkThroughError> {
    if let Some(name) = &stmt.name {
        if !database.is_current_database(name) {
            return Err(WalkThroughError::access_other_database(&database.name, name));
        }
    }
    for option in &stmt.options {
        match option {
            DatabaseOption::CharacterSet(character_set) => {
                database.character_set = character_set.clone();
            }
            DatabaseOption::Collation(collation) => {
                database.collation = collation.clone();
            }
        }
    }
    Ok(())
}

pub(crate) fn apply_drop(
    database: &mut DatabaseState,
    stmt: &DropDatabaseStmt,
) -> Result<(), WalkThroughError> {
    if !database.is_current_database(&stmt.name) {
        return Err(WalkThroughError::access_other_database(&database.name, &stmt.name));
    }
    database.mark_deleted();
    Ok(())
}
