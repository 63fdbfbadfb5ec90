//! Snapshot metadata and its conversion into simulation state.
//!
//! A snapshot is the serialized description of a live database as an
//! introspection pass produced it. Building a [`DatabaseState`] from it
//! folds stored names per the dialect, assigns column ordinals, fills
//! the shared relation name space and installs view back-references on
//! the tables and columns each view reads.

use serde::{Deserialize, Serialize};

use crate::column::ColumnState;
use crate::database::DatabaseState;
use crate::dialect::WalkThroughContext;
use crate::ident::fold_identifier;
use crate::index::IndexState;
use crate::schema::SchemaState;
use crate::table::TableState;
use crate::view::{ViewRef, ViewState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseMetadata {
    pub name: String,
    pub character_set: String,
    pub collation: String,
    pub schemas: Vec<SchemaMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMetadata {
    pub name: String,
    pub tables: Vec<TableMetadata>,
    pub views: Vec<ViewMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableMetadata {
    pub name: String,
    pub engine: Option<String>,
    pub collation: Option<String>,
    pub comment: Option<String>,
    pub columns: Vec<ColumnMetadata>,
    pub indexes: Vec<IndexMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMetadata {
    pub name: String,
    /// 1-based ordinal; 0 means "use the snapshot order".
    pub position: usize,
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub default: Option<String>,
    pub nullable: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexMetadata {
    pub name: String,
    pub expressions: Vec<String>,
    #[serde(rename = "type")]
    pub index_type: Option<String>,
    pub unique: bool,
    pub primary: bool,
    pub visible: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewMetadata {
    pub name: String,
    pub definition: String,
    pub comment: String,
    pub dependency_columns: Vec<DependencyColumn>,
}

/// One column a view reads from, as recorded by introspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyColumn {
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl DatabaseState {
    /// Build simulation state from a snapshot.
    pub fn from_metadata(metadata: &DatabaseMetadata, ctx: WalkThroughContext) -> Self {
        let mut database = DatabaseState::empty(&metadata.name, ctx);
        database.character_set = metadata.character_set.clone();
        database.collation = metadata.collation.clone();

        for schema_meta in &metadata.schemas {
            let mut schema = SchemaState::new(&schema_meta.name);
            for table_meta in &schema_meta.tables {
                let table = build_table(table_meta, ctx);
                schema.register_identifier(&table.name);
                for index in table.indexes.values() {
                    schema.register_identifier(&index.name);
                }
                schema.tables.insert(table.name.clone(), table);
            }
            for view_meta in &schema_meta.views {
                let view = ViewState {
                    name: view_meta.name.clone(),
                    definition: view_meta.definition.clone(),
                    comment: view_meta.comment.clone(),
                };
                schema.register_identifier(&view.name);
                schema.views.insert(view.name.clone(), view);
            }
            database.schemas.insert(schema.name.clone(), schema);
        }

        install_view_dependencies(&mut database, metadata, ctx);
        database
    }
}

fn build_table(metadata: &TableMetadata, ctx: WalkThroughContext) -> TableState {
    let fold = ctx.rules().lowercase_keys;
    let mut table = TableState::new(&metadata.name);
    table.engine = metadata.engine.clone();
    table.collation = metadata.collation.clone();
    table.comment = metadata.comment.clone();

    for (ordinal, column_meta) in metadata.columns.iter().enumerate() {
        let name = fold_identifier(&column_meta.name, fold);
        let column = ColumnState {
            name: name.clone(),
            position: if column_meta.position > 0 { column_meta.position } else { ordinal + 1 },
            column_type: column_meta.column_type.clone(),
            character_set: column_meta.character_set.clone(),
            collation: column_meta.collation.clone(),
            default_value: column_meta.default.clone(),
            nullable: Some(column_meta.nullable),
            comment: column_meta.comment.clone(),
            dependent_views: Default::default(),
        };
        table.columns.insert(name, column);
    }

    for index_meta in &metadata.indexes {
        let name = fold_identifier(&index_meta.name, fold);
        let index = IndexState {
            name: name.clone(),
            expressions: index_meta.expressions.clone(),
            index_type: index_meta.index_type.clone(),
            unique: index_meta.unique,
            primary: index_meta.primary,
            visible: index_meta.visible,
            comment: index_meta.comment.clone(),
            is_constraint: index_meta.primary || index_meta.unique,
        };
        table.indexes.insert(name, index);
    }
    table
}

/// Attach each view to the tables and columns it reads, so destructive
/// DDL against them can be blocked.
fn install_view_dependencies(
    database: &mut DatabaseState,
    metadata: &DatabaseMetadata,
    ctx: WalkThroughContext,
) {
    for schema_meta in &metadata.schemas {
        for view_meta in &schema_meta.views {
            let view_ref = ViewRef::new(&schema_meta.name, &view_meta.name);
            for dependency in &view_meta.dependency_columns {
                let Some(schema) = database.schemas.get_mut(&dependency.schema) else {
                    continue;
                };
                let Some(table) = schema.table_mut(ctx, &dependency.table) else {
                    continue;
                };
                table.dependent_views.insert(view_ref.clone());
                if let Some(column) = table.column_mut(ctx, &dependency.column) {
                    column.dependent_views.insert(view_ref.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::EngineDialect;

    fn snapshot() -> DatabaseMetadata {
        serde_json::from_value(serde_json::json!({
            "name": "shop",
            "schemas": [{
                "name": "public",
                "tables": [{
                    "name": "products",
                    "columns": [
                        {"name": "id", "type": "integer", "nullable": false},
                        {"name": "price", "type": "numeric", "nullable": true}
                    ],
                    "indexes": [
                        {"name": "products_pkey", "expressions": ["id"], "unique": true, "primary": true, "visible": true}
                    ]
                }],
                "views": [{
                    "name": "v1",
                    "definition": "select id from products",
                    "dependency_columns": [
                        {"schema": "public", "table": "products", "column": "id"}
                    ]
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_positions_assigned_from_snapshot_order() {
        let ctx = WalkThroughContext::new(EngineDialect::Postgres, true, false);
        let db = DatabaseState::from_metadata(&snapshot(), ctx);
        let table = db.find_table(None, "products").unwrap();
        assert_eq!(table.column(ctx, "id").unwrap().position, 1);
        assert_eq!(table.column(ctx, "price").unwrap().position, 2);
    }

    #[test]
    fn test_view_dependencies_installed() {
        let ctx = WalkThroughContext::new(EngineDialect::Postgres, true, false);
        let db = DatabaseState::from_metadata(&snapshot(), ctx);
        let table = db.find_table(None, "products").unwrap();
        let view_ref = ViewRef::new("public", "v1");
        assert!(table.dependent_views.contains(&view_ref));
        assert!(table.column(ctx, "id").unwrap().dependent_views.contains(&view_ref));
        assert!(table.column(ctx, "price").unwrap().dependent_views.is_empty());
    }

    #[test]
    fn test_relation_namespace_filled() {
        let ctx = WalkThroughContext::new(EngineDialect::Postgres, true, false);
        let db = DatabaseState::from_metadata(&snapshot(), ctx);
        let schema = db.schema(None).unwrap();
        assert!(schema.identifier_in_use(ctx, "products"));
        assert!(schema.identifier_in_use(ctx, "products_pkey"));
        assert!(schema.identifier_in_use(ctx, "v1"));
    }

    #[test]
    fn test_empty_comment_distinct_from_unset() {
        let mut meta = snapshot();
        meta.schemas[0].tables[0].comment = Some(String::new());
        meta.schemas[0].tables[0].columns[0].comment = Some(String::new());
        let ctx = WalkThroughContext::new(EngineDialect::Postgres, true, false);
        let db = DatabaseState::from_metadata(&meta, ctx);
        let table = db.find_table(None, "products").unwrap();
        assert_eq!(table.comment.as_deref(), Some(""));
        assert_eq!(table.column(ctx, "id").unwrap().comment.as_deref(), Some(""));
        assert_eq!(table.column(ctx, "price").unwrap().comment, None);
    }

    #[test]
    fn test_mysql_folds_column_names() {
        let mut meta = snapshot();
        meta.schemas[0].name = String::new();
        meta.schemas[0].tables[0].columns[0].name = "Id".to_string();
        let ctx = WalkThroughContext::new(EngineDialect::MySql, true, true);
        let db = DatabaseState::from_metadata(&meta, ctx);
        let table = db.find_table(None, "products").unwrap();
        assert!(table.columns.contains_key("id"));
    }
}
