//! ALTER TABLE.
//!
//! Clauses apply in statement order and the first failure wins. A
//! RENAME or SET SCHEMA clause retargets every clause after it.

use catwalk_ast::{
    AlterTableAction, AlterTableStmt, ColumnDef, DefaultClause, TableConstraint,
    TableConstraintKind, TableOption,
};
use catwalk_catalog::ident::base_type;
use catwalk_catalog::{
    DatabaseState, ErrorCode, SchemaState, TableState, WalkThroughContext, WalkThroughError,
};

use crate::constraints;
use crate::validation;
use crate::walk::check_database_qualifier;

pub(crate) fn apply(
    database: &mut DatabaseState,
    stmt: &AlterTableStmt,
) -> Result<(), WalkThroughError> {
    check_database_qualifier(database, &stmt.table)?;
    let ctx = database.ctx;

    let mut schema_name;
    let mut table_key;
    {
        let schema = database.ensure_schema(stmt.table.schema.as_deref())?;
        schema_name = schema.name.clone();
        table_key = match schema.table_key(ctx, &stmt.table.name) {
            Some(key) => key,
            None => {
                if ctx.check_integrity {
                    return Err(WalkThroughError::table_not_exists(&stmt.table.name));
                }
                schema.create_incomplete_table(&stmt.table.name);
                stmt.table.name.clone()
            }
        };
    }

    for action in &stmt.actions {
        apply_action(database, ctx, &mut schema_name, &mut table_key, action)?;
    }
    Ok(())
}

fn schema_mut<'a>(
    database: &'a mut DatabaseState,
    schema_name: &str,
) -> Result<&'a mut SchemaState, WalkThroughError> {
    database.schemas.get_mut(schema_name).ok_or_else(|| {
        WalkThroughError::new(ErrorCode::Internal, format!("schema `{schema_name}` vanished"))
    })
}

fn table_mut<'a>(
    schema: &'a mut SchemaState,
    table_key: &str,
) -> Result<&'a mut TableState, WalkThroughError> {
    schema.tables.get_mut(table_key).ok_or_else(|| {
        WalkThroughError::new(ErrorCode::Internal, format!("table `{table_key}` vanished"))
    })
}

fn apply_action(
    database: &mut DatabaseState,
    ctx: WalkThroughContext,
    schema_name: &mut String,
    table_key: &mut String,
    action: &AlterTableAction,
) -> Result<(), WalkThroughError> {
    match action {
        AlterTableAction::SetOption(option) => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            match option {
                TableOption::Engine(engine) => table.engine = Some(engine.clone()),
                TableOption::Collation(collation) => table.collation = Some(collation.clone()),
                TableOption::Comment(comment) => table.comment = Some(comment.clone()),
            }
            Ok(())
        }

        AlterTableAction::AddColumns { columns, position } => {
            let schema = schema_mut(database, schema_name)?;
            let single = columns.len() == 1;
            for def in columns {
                add_column(ctx, schema, table_key, def, if single { position.as_ref() } else { None })?;
            }
            Ok(())
        }

        AlterTableAction::DropColumn { name, if_exists } => {
            drop_column(database, ctx, schema_name, table_key, name, *if_exists)
        }

        AlterTableAction::ModifyColumn { definition, position } => {
            redefine_column(database, ctx, schema_name, table_key, &definition.name, definition, position.as_ref())
        }

        AlterTableAction::ChangeColumn { old_name, definition, position } => {
            redefine_column(database, ctx, schema_name, table_key, old_name, definition, position.as_ref())
        }

        AlterTableAction::RenameColumn { old_name, new_name } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            table.rename_column(ctx, old_name, new_name)
        }

        AlterTableAction::AlterColumnType { name, column_type, collation } => {
            alter_column_type(database, ctx, schema_name, table_key, name, column_type, collation.as_deref())
        }

        AlterTableAction::SetDefault { column, default } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            let table_name = table.name.clone();
            let state = resolve_column(ctx, table, column)?;
            let Some(state) = state else { return Ok(()) };
            match default {
                DefaultClause::Null => {
                    if ctx.rules().reject_null_default_on_not_null && state.nullable == Some(false) {
                        return Err(WalkThroughError::set_null_default_for_not_null_column(
                            &table_name,
                            column,
                        ));
                    }
                    state.default_value = None;
                }
                DefaultClause::Expression(expression) => {
                    let type_text = state.column_type.as_deref().unwrap_or_default();
                    let base = base_type(type_text);
                    validation::check_default_allowed(ctx, column, &base, type_text, 0)?;
                    state.default_value = Some(expression.clone());
                }
            }
            Ok(())
        }

        AlterTableAction::DropDefault { column } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            if let Some(state) = resolve_column(ctx, table, column)? {
                state.default_value = None;
            }
            Ok(())
        }

        AlterTableAction::SetNotNull { column } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            if let Some(state) = resolve_column(ctx, table, column)? {
                state.nullable = Some(false);
            }
            Ok(())
        }

        AlterTableAction::DropNotNull { column } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            if let Some(state) = resolve_column(ctx, table, column)? {
                state.nullable = Some(true);
            }
            Ok(())
        }

        AlterTableAction::AddConstraint(constraint) => {
            let schema = schema_mut(database, schema_name)?;
            constraints::add_constraint(ctx, schema, table_key, constraint)
        }

        AlterTableAction::DropPrimaryKey => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            let name = match ctx.rules().reserved_primary_key_name {
                Some(reserved) => reserved.to_string(),
                None => match table.primary_key() {
                    Some(index) => index.name.clone(),
                    None => {
                        if ctx.check_integrity {
                            return Err(WalkThroughError::primary_key_not_exists(&table.name));
                        }
                        return Ok(());
                    }
                },
            };
            if let Some(removed) = table.drop_index(ctx, &name)? {
                schema.unregister_identifier(&removed.name);
            }
            Ok(())
        }

        AlterTableAction::DropIndex { name } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            if let Some(removed) = table.drop_index(ctx, name)? {
                schema.unregister_identifier(&removed.name);
            }
            Ok(())
        }

        AlterTableAction::DropConstraint { name } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            let found = table
                .index(ctx, name)
                .is_some_and(|index| index.is_constraint);
            if !found {
                if ctx.check_integrity {
                    return Err(WalkThroughError::constraint_not_exists(&table.name, name));
                }
                return Ok(());
            }
            if let Some(removed) = table.drop_index(ctx, name)? {
                schema.unregister_identifier(&removed.name);
            }
            Ok(())
        }

        AlterTableAction::RenameConstraint { old_name, new_name } => {
            let schema = schema_mut(database, schema_name)?;
            {
                let table = table_mut(schema, table_key)?;
                let found = table
                    .index(ctx, old_name)
                    .is_some_and(|index| index.is_constraint);
                if !found {
                    if ctx.check_integrity {
                        return Err(WalkThroughError::constraint_not_exists(&table.name, old_name));
                    }
                    return Ok(());
                }
            }
            schema.check_relation_free(ctx, new_name)?;
            let table = table_mut(schema, table_key)?;
            table.rename_index(ctx, old_name, new_name)?;
            schema.unregister_identifier(old_name);
            if ctx.rules().shared_relation_namespace {
                schema.register_identifier(new_name);
            }
            Ok(())
        }

        AlterTableAction::RenameTable { new_name } => {
            let schema = schema_mut(database, schema_name)?;
            schema.rename_table(ctx, table_key, new_name)?;
            *table_key = new_name.clone();
            Ok(())
        }

        AlterTableAction::RenameIndex { old_name, new_name } => {
            let schema = schema_mut(database, schema_name)?;
            schema.check_relation_free(ctx, new_name)?;
            let table = table_mut(schema, table_key)?;
            table.rename_index(ctx, old_name, new_name)?;
            schema.unregister_identifier(old_name);
            if ctx.rules().shared_relation_namespace {
                schema.register_identifier(new_name);
            }
            Ok(())
        }

        AlterTableAction::SetIndexVisibility { index, visible } => {
            let schema = schema_mut(database, schema_name)?;
            let table = table_mut(schema, table_key)?;
            if table.index(ctx, index).is_none() {
                if ctx.check_integrity {
                    return Err(WalkThroughError::index_not_exists(&table.name, index));
                }
                table.create_incomplete_index(ctx, index);
            }
            if let Some(state) = table.index_mut(ctx, index) {
                state.visible = *visible;
            }
            Ok(())
        }

        AlterTableAction::SetSchema { new_schema } => {
            move_to_schema(database, ctx, schema_name, table_key, new_schema)
        }
    }
}

fn add_column(
    ctx: WalkThroughContext,
    schema: &mut SchemaState,
    table_key: &str,
    def: &ColumnDef,
    position: Option<&catwalk_ast::ColumnPosition>,
) -> Result<(), WalkThroughError> {
    let state = validation::build_column_state(ctx, table_key, def)?;
    {
        let table = table_mut(schema, table_key)?;
        if def.auto_increment && table.has_auto_increment_column() {
            return Err(WalkThroughError::auto_increment_exists(&table.name));
        }
        table.create_column(ctx, state, position)?;
    }
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

/// MODIFY and CHANGE COLUMN share this path; MODIFY keeps the old name.
fn redefine_column(
    database: &mut DatabaseState,
    ctx: WalkThroughContext,
    schema_name: &str,
    table_key: &str,
    old_name: &str,
    def: &ColumnDef,
    position: Option<&catwalk_ast::ColumnPosition>,
) -> Result<(), WalkThroughError> {
    let state = validation::build_column_state(ctx, table_key, def)?;
    let schema = schema_mut(database, schema_name)?;
    let table = table_mut(schema, table_key)?;
    if def.auto_increment {
        let taken = table.columns.values().any(|column| {
            !catwalk_catalog::ident::identifiers_equal(&column.name, old_name, true)
                && column
                    .default_value
                    .as_deref()
                    .is_some_and(|default| default.eq_ignore_ascii_case("AUTO_INCREMENT"))
        });
        if taken {
            return Err(WalkThroughError::auto_increment_exists(&table.name));
        }
    }
    table.change_column(ctx, old_name, state, position)?;
    if def.primary_key {
        let mut constraint = TableConstraint::new(TableConstraintKind::PrimaryKey);
        constraint.keys = vec![catwalk_ast::IndexKey::Column(def.name.clone())];
        constraints::add_constraint(ctx, schema, table_key, &constraint)?;
    }
    Ok(())
}

fn drop_column(
    database: &mut DatabaseState,
    ctx: WalkThroughContext,
    schema_name: &str,
    table_key: &str,
    column: &str,
    if_exists: bool,
) -> Result<(), WalkThroughError> {
    // Read phase: views still reading the column block the drop.
    {
        let schema = database
            .schemas
            .get(schema_name)
            .ok_or_else(|| WalkThroughError::new(ErrorCode::Internal, "schema vanished"))?;
        let Some(table) = schema.tables.get(table_key) else {
            return Err(WalkThroughError::new(ErrorCode::Internal, "table vanished"));
        };
        match table.column(ctx, column) {
            Some(state) => {
                let blocking = database.existing_views(&state.dependent_views);
                if !blocking.is_empty() {
                    return Err(WalkThroughError::column_referenced_by_views(
                        &table.name,
                        column,
                        &blocking,
                    ));
                }
            }
            None if if_exists => return Ok(()),
            None => {}
        }
    }

    let schema = schema_mut(database, schema_name)?;
    let table = table_mut(schema, table_key)?;
    let dropped_indexes = table.drop_column(ctx, column)?;
    for name in dropped_indexes {
        schema.unregister_identifier(&name);
    }
    Ok(())
}

fn alter_column_type(
    database: &mut DatabaseState,
    ctx: WalkThroughContext,
    schema_name: &str,
    table_key: &str,
    column: &str,
    column_type: &str,
    collation: Option<&str>,
) -> Result<(), WalkThroughError> {
    // Read phase: views still reading the column block the type change.
    {
        let schema = database
            .schemas
            .get(schema_name)
            .ok_or_else(|| WalkThroughError::new(ErrorCode::Internal, "schema vanished"))?;
        if let Some(table) = schema.tables.get(table_key) {
            if let Some(state) = table.column(ctx, column) {
                let blocking = database.existing_views(&state.dependent_views);
                if !blocking.is_empty() {
                    return Err(WalkThroughError::column_referenced_by_views(
                        &table.name,
                        column,
                        &blocking,
                    ));
                }
            }
        }
    }

    let schema = schema_mut(database, schema_name)?;
    let table = table_mut(schema, table_key)?;
    if let Some(state) = resolve_column(ctx, table, column)? {
        state.column_type = Some(column_type.to_string());
        if let Some(collation) = collation {
            state.collation = Some(collation.to_string());
        }
    }
    Ok(())
}

/// Find a column for mutation, fabricating a placeholder under lenient
/// integrity. `Ok(None)` means "nothing to do" in lenient mode.
fn resolve_column<'a>(
    ctx: WalkThroughContext,
    table: &'a mut TableState,
    column: &str,
) -> Result<Option<&'a mut catwalk_catalog::ColumnState>, WalkThroughError> {
    if table.column(ctx, column).is_none() {
        if ctx.check_integrity {
            return Err(WalkThroughError::column_not_exists(&table.name, column));
        }
        table.create_incomplete_column(&catwalk_catalog::ident::fold_identifier(
            column,
            ctx.rules().lowercase_keys,
        ));
    }
    Ok(table.column_mut(ctx, column))
}

fn move_to_schema(
    database: &mut DatabaseState,
    ctx: WalkThroughContext,
    schema_name: &mut String,
    table_key: &mut String,
    new_schema: &str,
) -> Result<(), WalkThroughError> {
    if schema_name.as_str() == new_schema {
        return Ok(());
    }
    if !database.has_schema(new_schema) {
        return Err(WalkThroughError::schema_not_exists(new_schema));
    }
    {
        let target = database
            .schemas
            .get(new_schema)
            .ok_or_else(|| WalkThroughError::new(ErrorCode::Internal, "schema vanished"))?;
        if target.has_table(ctx, table_key) {
            return Err(WalkThroughError::table_exists(table_key));
        }
        target.check_relation_free(ctx, table_key)?;
    }

    let table = {
        let source = schema_mut(database, schema_name)?;
        match source.drop_table(ctx, table_key)? {
            Some(table) => table,
            None => return Ok(()),
        }
    };
    let target = schema_mut(database, new_schema)?;
    for index in table.indexes.values() {
        target.register_identifier(&index.name);
    }
    target.create_table(ctx, table)?;
    *schema_name = new_schema.to_string();
    Ok(())
}
