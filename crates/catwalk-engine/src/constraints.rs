//! Index and constraint creation shared by CREATE TABLE, CREATE INDEX
//! and ALTER TABLE ADD CONSTRAINT.
//!
//! Everything here works through the owning schema plus a table key so
//! the shared relation name space can be updated in the same motion as
//! the table itself.

use catwalk_ast::{IndexKey, TableConstraint, TableConstraintKind};
use catwalk_catalog::ident::fold_identifier;
use catwalk_catalog::{
    ErrorCode, IndexState, SchemaState, TableState, WalkThroughContext, WalkThroughError,
};

use crate::naming;

/// What an index-creating clause asked for, independent of its syntax.
pub(crate) struct IndexSpec<'a> {
    pub name: Option<String>,
    pub keys: &'a [IndexKey],
    pub unique: bool,
    pub index_type: Option<String>,
    pub visible: bool,
    pub is_constraint: bool,
    pub if_not_exists: bool,
}

/// The stored expression list for a key list. Plain column keys fold per
/// the dialect so they line up with stored column names.
pub(crate) fn key_texts(ctx: WalkThroughContext, keys: &[IndexKey]) -> Vec<String> {
    let fold = ctx.rules().lowercase_keys;
    keys.iter()
        .map(|key| match key {
            IndexKey::Column(name) => fold_identifier(name, fold),
            IndexKey::Expression(expression) => expression.clone(),
        })
        .collect()
}

/// Resolve every bare column key against the table. Primary keys force
/// their columns NOT NULL; spatial keys must already be NOT NULL.
pub(crate) fn validate_keys(
    ctx: WalkThroughContext,
    table: &mut TableState,
    keys: &[IndexKey],
    primary: bool,
    spatial: bool,
) -> Result<(), WalkThroughError> {
    for key in keys {
        let IndexKey::Column(name) = key else { continue };
        if table.column(ctx, name).is_none() {
            if ctx.check_integrity {
                return Err(WalkThroughError::column_not_exists(&table.name, name));
            }
            table.create_incomplete_column(&fold_identifier(name, ctx.rules().lowercase_keys));
        }
        if spatial && ctx.check_integrity {
            let nullable = table.column(ctx, name).is_some_and(|column| column.is_nullable());
            if nullable {
                return Err(WalkThroughError::spatial_index_key_nullable(name));
            }
        }
        if primary {
            if let Some(column) = table.column_mut(ctx, name) {
                column.nullable = Some(false);
            }
        }
    }
    Ok(())
}

fn table_mut<'a>(
    schema: &'a mut SchemaState,
    table_key: &str,
) -> Result<&'a mut TableState, WalkThroughError> {
    schema.tables.get_mut(table_key).ok_or_else(|| {
        WalkThroughError::new(ErrorCode::Internal, format!("table `{table_key}` vanished"))
    })
}

/// Create a secondary index on a table, generating a name when the
/// statement left it out.
pub(crate) fn create_index_on_table(
    ctx: WalkThroughContext,
    schema: &mut SchemaState,
    table_key: &str,
    spec: IndexSpec<'_>,
) -> Result<(), WalkThroughError> {
    let spatial = spec.index_type.as_deref() == Some("SPATIAL");
    {
        let table = table_mut(schema, table_key)?;
        if spec.keys.is_empty() {
            return Err(WalkThroughError::index_empty_keys(
                &table.name,
                spec.name.as_deref().unwrap_or_default(),
            ));
        }
        if let (Some(name), Some(reserved)) =
            (spec.name.as_deref(), ctx.rules().reserved_primary_key_name)
        {
            if name.eq_ignore_ascii_case(reserved) {
                return Err(WalkThroughError::incorrect_index_name(name));
            }
        }
        validate_keys(ctx, table, spec.keys, false, spatial)?;
    }

    let name = match &spec.name {
        Some(name) => name.clone(),
        None if ctx.dialect.is_postgres() => {
            let suffix = if spec.is_constraint && spec.unique { "key" } else { "idx" };
            naming::pg_index_name(ctx, schema, table_key, spec.keys, suffix)
        }
        None => {
            let table = table_mut(schema, table_key)?;
            naming::mysql_index_name(table, spec.keys)
        }
    };

    {
        let table = table_mut(schema, table_key)?;
        if table.index(ctx, &name).is_some() {
            if spec.if_not_exists {
                return Ok(());
            }
            return Err(WalkThroughError::index_exists(&table.name, &name));
        }
    }
    schema.check_relation_free(ctx, &name)?;
    if ctx.rules().shared_relation_namespace {
        schema.register_identifier(&name);
    }

    let expressions = key_texts(ctx, spec.keys);
    let table = table_mut(schema, table_key)?;
    table.create_index(
        ctx,
        IndexState {
            name,
            expressions,
            index_type: Some(spec.index_type.unwrap_or_else(|| "BTREE".to_string())),
            unique: spec.unique,
            primary: false,
            visible: spec.visible,
            comment: None,
            is_constraint: spec.is_constraint,
        },
    )
}

/// Create a primary key from an explicit key list.
pub(crate) fn add_primary_key(
    ctx: WalkThroughContext,
    schema: &mut SchemaState,
    table_key: &str,
    name: Option<String>,
    keys: &[IndexKey],
    index_type: Option<String>,
) -> Result<(), WalkThroughError> {
    {
        let table = table_mut(schema, table_key)?;
        if keys.is_empty() {
            return Err(WalkThroughError::index_empty_keys(&table.name, "PRIMARY"));
        }
        if table.has_primary_key() {
            return Err(WalkThroughError::primary_key_exists(&table.name));
        }
        validate_keys(ctx, table, keys, true, false)?;
    }

    let name = match ctx.rules().reserved_primary_key_name {
        Some(reserved) => reserved.to_string(),
        None => match name {
            Some(name) => name,
            None => naming::pg_primary_key_name(ctx, schema, table_key),
        },
    };
    {
        let table = table_mut(schema, table_key)?;
        if table.index(ctx, &name).is_some() {
            return Err(WalkThroughError::primary_key_exists(&table.name));
        }
    }
    schema.check_relation_free(ctx, &name)?;
    if ctx.rules().shared_relation_namespace {
        schema.register_identifier(&name);
    }

    let expressions = key_texts(ctx, keys);
    let table = table_mut(schema, table_key)?;
    table.create_index(
        ctx,
        IndexState {
            name,
            expressions,
            index_type: Some(index_type.unwrap_or_else(|| "BTREE".to_string())),
            unique: true,
            primary: true,
            visible: true,
            comment: None,
            is_constraint: true,
        },
    )
}

/// PRIMARY KEY / UNIQUE ... USING INDEX: promote an existing index to a
/// constraint, optionally renaming it to the constraint name.
pub(crate) fn constraint_using_index(
    ctx: WalkThroughContext,
    schema: &mut SchemaState,
    table_key: &str,
    constraint: &TableConstraint,
    primary: bool,
) -> Result<(), WalkThroughError> {
    let Some(index_name) = constraint.using_index.as_deref() else {
        return Err(WalkThroughError::new(
            ErrorCode::InvalidStatement,
            "USING INDEX constraint without an index name",
        ));
    };

    let key_columns;
    {
        let table = table_mut(schema, table_key)?;
        if table.index(ctx, index_name).is_none() {
            if ctx.check_integrity {
                return Err(WalkThroughError::index_not_exists(&table.name, index_name));
            }
            table.create_incomplete_index(ctx, index_name);
        }
        if primary && table.has_primary_key() {
            return Err(WalkThroughError::primary_key_exists(&table.name));
        }
        let index = table
            .index_mut(ctx, index_name)
            .ok_or_else(|| WalkThroughError::index_not_exists(table_key, index_name))?;
        if primary {
            index.primary = true;
        }
        index.unique = true;
        index.is_constraint = true;
        key_columns = index.expressions.clone();

        if primary {
            for column_name in &key_columns {
                if let Some(column) = table.column_mut(ctx, column_name) {
                    column.nullable = Some(false);
                }
            }
        }
    }

    if let Some(constraint_name) = constraint.name.as_deref() {
        if constraint_name != index_name {
            schema.check_relation_free(ctx, constraint_name)?;
            let table = table_mut(schema, table_key)?;
            table.rename_index(ctx, index_name, constraint_name)?;
            schema.unregister_identifier(index_name);
            if ctx.rules().shared_relation_namespace {
                schema.register_identifier(constraint_name);
            }
        }
    }
    Ok(())
}

/// Apply one table-level constraint clause.
pub(crate) fn add_constraint(
    ctx: WalkThroughContext,
    schema: &mut SchemaState,
    table_key: &str,
    constraint: &TableConstraint,
) -> Result<(), WalkThroughError> {
    match constraint.kind {
        TableConstraintKind::PrimaryKey => add_primary_key(
            ctx,
            schema,
            table_key,
            constraint.name.clone(),
            &constraint.keys,
            constraint.index_type.clone(),
        ),
        TableConstraintKind::PrimaryKeyUsingIndex => {
            constraint_using_index(ctx, schema, table_key, constraint, true)
        }
        TableConstraintKind::UniqueUsingIndex => {
            constraint_using_index(ctx, schema, table_key, constraint, false)
        }
        TableConstraintKind::Unique => create_index_on_table(
            ctx,
            schema,
            table_key,
            IndexSpec {
                name: constraint.name.clone(),
                keys: &constraint.keys,
                unique: true,
                index_type: constraint.index_type.clone(),
                visible: !constraint.invisible,
                is_constraint: true,
                if_not_exists: false,
            },
        ),
        TableConstraintKind::Index => create_index_on_table(
            ctx,
            schema,
            table_key,
            IndexSpec {
                name: constraint.name.clone(),
                keys: &constraint.keys,
                unique: false,
                index_type: constraint.index_type.clone(),
                visible: !constraint.invisible,
                is_constraint: false,
                if_not_exists: false,
            },
        ),
        TableConstraintKind::Fulltext => create_index_on_table(
            ctx,
            schema,
            table_key,
            IndexSpec {
                name: constraint.name.clone(),
                keys: &constraint.keys,
                unique: false,
                index_type: Some("FULLTEXT".to_string()),
                visible: !constraint.invisible,
                is_constraint: false,
                if_not_exists: false,
            },
        ),
        TableConstraintKind::Spatial => create_index_on_table(
            ctx,
            schema,
            table_key,
            IndexSpec {
                name: constraint.name.clone(),
                keys: &constraint.keys,
                unique: false,
                index_type: Some("SPATIAL".to_string()),
                visible: !constraint.invisible,
                is_constraint: false,
                if_not_exists: false,
            },
        ),
        // Foreign keys and CHECK constraints do not shape the catalog.
        TableConstraintKind::ForeignKey | TableConstraintKind::Check => Ok(()),
    }
}
