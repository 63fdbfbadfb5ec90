//! Auto-generated index and constraint names.

use catwalk_ast::IndexKey;
use catwalk_catalog::{SchemaState, TableState, WalkThroughContext};
use itertools::Itertools;

/// MySQL names an unnamed index after its first key, appending `_2`,
/// `_3`, ... until the name is free within the table.
pub(crate) fn mysql_index_name(table: &TableState, keys: &[IndexKey]) -> String {
    let base = match keys.first() {
        Some(IndexKey::Column(name)) => name.clone(),
        Some(IndexKey::Expression(_)) => "functional_index".to_string(),
        None => "index".to_string(),
    };
    let base = base.to_ascii_lowercase();
    let mut suffix = 1usize;
    loop {
        let candidate = if suffix == 1 { base.clone() } else { format!("{base}_{suffix}") };
        if !table.indexes.contains_key(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// PostgreSQL builds `{table}_{key1}_{key2}_{suffix}`; expression keys
/// become `expr`, `expr1`, ... in order. Collisions in the schema's
/// relation name space get a trailing number.
pub(crate) fn pg_index_name(
    ctx: WalkThroughContext,
    schema: &SchemaState,
    table: &str,
    keys: &[IndexKey],
    suffix: &str,
) -> String {
    let mut expr_count = 0usize;
    let parts = keys
        .iter()
        .map(|key| match key {
            IndexKey::Column(name) => name.clone(),
            IndexKey::Expression(_) => {
                let part = if expr_count == 0 {
                    "expr".to_string()
                } else {
                    format!("expr{expr_count}")
                };
                expr_count += 1;
                part
            }
        })
        .join("_");
    let base = if parts.is_empty() {
        format!("{table}_{suffix}")
    } else {
        format!("{table}_{parts}_{suffix}")
    };
    free_relation_name(ctx, schema, base)
}

/// PostgreSQL primary key constraints are named `{table}_pkey`.
pub(crate) fn pg_primary_key_name(
    ctx: WalkThroughContext,
    schema: &SchemaState,
    table: &str,
) -> String {
    free_relation_name(ctx, schema, format!("{table}_pkey"))
}

pub(crate) fn free_relation_name(
    ctx: WalkThroughContext,
    schema: &SchemaState,
    base: String,
) -> String {
    if !schema.identifier_in_use(ctx, &base) {
        return base;
    }
    let mut counter = 1usize;
    loop {
        let candidate = format!("{base}{counter}");
        if !schema.identifier_in_use(ctx, &candidate) {
            return candidate;
        }
        counter += 1;
    }
}
