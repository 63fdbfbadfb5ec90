//! CREATE TABLE.

use catwalk_ast::{ColumnDef, CreateTableStmt, TableConstraint, TableConstraintKind};
use catwalk_catalog::ident::fold_identifier;
use catwalk_catalog::{DatabaseState, TableState, WalkThroughError};
use itertools::Itertools;

use crate::constraints;
use crate::naming;
use crate::validation;
use crate::walk::check_database_qualifier;

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &CreateTableStmt,
) -> Result<(), WalkThroughError> {
    check_database_qualifier(database, &stmt.name)?;
    if stmt.as_select {
        return Err(WalkThroughError::use_create_table_as(&stmt.name.name));
    }
    let ctx = database.ctx;

    // Duplicate column names fail before any state changes.
    let fold = ctx.rules().lowercase_keys;
    if let Some(duplicate) = stmt
        .columns
        .iter()
        .map(|def| fold_identifier(&def.name, fold))
        .duplicates()
        .next()
    {
        return Err(WalkThroughError::column_exists(&stmt.name.name, &duplicate));
    }
    if stmt.columns.iter().filter(|def| def.auto_increment).count() > 1 {
        return Err(WalkThroughError::auto_increment_exists(&stmt.name.name));
    }

    let schema = database.ensure_schema(stmt.name.schema.as_deref())?;
    if schema.has_table(ctx, &stmt.name.name) {
        // A conflict on a known table is an error even under lenient
        // integrity; leniency only forgives references to missing objects.
        if stmt.if_not_exists {
            return Ok(());
        }
        return Err(WalkThroughError::table_exists(&stmt.name.name));
    }

    if let Some(source) = &stmt.like {
        let Some(source_table) = schema.table(ctx, &source.name) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(&source.name));
            }
            schema.create_incomplete_table(&stmt.name.name);
            return Ok(());
        };
        let mut copy = source_table.clone();
        copy.name = stmt.name.name.clone();
        copy.dependent_views.clear();
        for column in copy.columns.values_mut() {
            column.dependent_views.clear();
        }
        if ctx.rules().shared_relation_namespace {
            // The source still owns the original index names, so the
            // copies take fresh ones in the shared name space.
            let names: Vec<String> = copy.indexes.keys().cloned().collect();
            for name in names {
                let fresh = naming::free_relation_name(ctx, schema, name.clone());
                if let Some(mut index) = copy.indexes.remove(&name) {
                    index.name = fresh.clone();
                    copy.indexes.insert(fresh.clone(), index);
                }
                schema.register_identifier(&fresh);
            }
        }
        return schema.create_table(ctx, copy);
    }

    schema.create_table(ctx, TableState::new(&stmt.name.name))?;
    let table_key = schema
        .table_key(ctx, &stmt.name.name)
        .unwrap_or_else(|| stmt.name.name.clone());

    for def in &stmt.columns {
        let state = validation::build_column_state(ctx, &stmt.name.name, def)?;
        if let Some(table) = schema.tables.get_mut(&table_key) {
            table.create_column(ctx, state, None)?;
        }
        apply_inline_attributes(ctx, schema, &table_key, def)?;
    }
    for constraint in &stmt.constraints {
        constraints::add_constraint(ctx, schema, &table_key, constraint)?;
    }
    Ok(())
}

/// Inline PRIMARY KEY and UNIQUE column attributes become constraints.
fn apply_inline_attributes(
    ctx: catwalk_catalog::WalkThroughContext,
    schema: &mut catwalk_catalog::SchemaState,
    table_key: &str,
    def: &ColumnDef,
) -> Result<(), WalkThroughError> {
    if def.primary_key {
        let mut constraint = TableConstraint::new(TableConstraintKind::PrimaryKey);
        constraint.keys = vec![catwalk_ast::IndexKey::Column(def.name.clone())];
        constraints::add_constraint(ctx, schema, table_key, &constraint)?;
    }
    if def.unique {
        let mut constraint = TableConstraint::new(TableConstraintKind::Unique);
        constraint.keys = vec![catwalk_ast::IndexKey::Column(def.name.clone())];
        constraints::add_constraint(ctx, schema, table_key, &constraint)?;
    }
    Ok(())
}
