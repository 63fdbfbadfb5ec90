//! MySQL-family walk-through behavior.

use catwalk_ast::{
    AlterTableAction, ColumnPosition, CreateTableStmt, DefaultClause, DropIndexStmt, IndexKey,
    IndexKind, ObjectName, RenamePair, RenameTableStmt, Statement, TableConstraint,
    TableConstraintKind, TableOption,
};
use catwalk_catalog::ErrorCode;

use super::helpers::*;

fn positions(catalog: &crate::Catalog, table: &str) -> Vec<(String, usize)> {
    let state = catalog.final_state().find_table(None, table).unwrap();
    state
        .columns_by_position()
        .iter()
        .map(|column| (column.name.clone(), column.position))
        .collect()
}

#[test]
fn test_create_then_duplicate_create_fails() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("t", vec![column("id", "int")]))
        .unwrap();
    let err = catalog
        .walk_through(&create_table("t", vec![column("id", "int")]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableExists);
    assert_eq!(err.line, 1);
    // The first table survives the failed statement.
    assert!(catalog.final_state().find_table(None, "t").is_some());
}

#[test]
fn test_add_column_positions() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("t", vec![column("a", "int"), column("b", "int")]))
        .unwrap();
    catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::AddColumns {
                columns: vec![column("c", "int")],
                position: Some(ColumnPosition::After("a".to_string())),
            }],
        ))
        .unwrap();
    assert_eq!(
        positions(&catalog, "t"),
        vec![("a".to_string(), 1), ("c".to_string(), 2), ("b".to_string(), 3)]
    );
}

#[test]
fn test_drop_column_cascades_to_indexes() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table(
            "t",
            vec![column("a", "int"), column("b", "int"), column("c", "int")],
        ))
        .unwrap();
    catalog.walk_through(&create_index(Some("idx_ab"), "t", &["a", "b"])).unwrap();
    catalog.walk_through(&create_index(Some("idx_b"), "t", &["b"])).unwrap();

    catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::DropColumn { name: "b".to_string(), if_exists: false }],
        ))
        .unwrap();

    let ctx = catalog.final_state().ctx;
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert!(table.index(ctx, "idx_b").is_none());
    assert_eq!(table.index(ctx, "idx_ab").unwrap().expressions, vec!["a".to_string()]);
    assert_eq!(positions(&catalog, "t"), vec![("a".to_string(), 1), ("c".to_string(), 2)]);
}

#[test]
fn test_drop_last_column_rejected() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("only", "int")])).unwrap();
    let err = catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::DropColumn { name: "only".to_string(), if_exists: false }],
        ))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DropAllColumns);
}

#[test]
fn test_case_folded_names_resolve() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("Users", vec![column("Id", "int")])).unwrap();
    // Table names fold at comparison time, column names at storage time.
    catalog
        .walk_through(&alter_table(
            "users",
            vec![AlterTableAction::AddColumns {
                columns: vec![column("email", "varchar(255)")],
                position: None,
            }],
        ))
        .unwrap();
    let table = catalog.final_state().find_table(None, "USERS").unwrap();
    assert_eq!(table.name, "Users");
    assert!(table.columns.contains_key("id"));
}

#[test]
fn test_auto_generated_index_names() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("a", "int")])).unwrap();
    catalog.walk_through(&create_index(None, "t", &["a"])).unwrap();
    catalog.walk_through(&create_index(None, "t", &["a"])).unwrap();

    let ctx = catalog.final_state().ctx;
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert!(table.index(ctx, "a").is_some());
    assert!(table.index(ctx, "a_2").is_some());
}

#[test]
fn test_single_auto_increment() {
    let mut catalog = mysql_catalog();
    let mut id = column("id", "int");
    id.auto_increment = true;
    catalog.walk_through(&create_table("t", vec![id, column("n", "int")])).unwrap();

    let mut second = column("n2", "int");
    second.auto_increment = true;
    let err = catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::AddColumns { columns: vec![second], position: None }],
        ))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AutoIncrementExists);
}

#[test]
fn test_primary_key_forces_not_null_and_reserved_name() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("t", vec![column("id", "int"), column("n", "int")]))
        .unwrap();
    let mut pk = TableConstraint::new(TableConstraintKind::PrimaryKey);
    pk.keys = vec![IndexKey::Column("id".to_string())];
    catalog
        .walk_through(&alter_table("t", vec![AlterTableAction::AddConstraint(pk.clone())]))
        .unwrap();

    let ctx = catalog.final_state().ctx;
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert_eq!(table.column(ctx, "id").unwrap().nullable, Some(false));
    assert!(table.index(ctx, "PRIMARY").unwrap().primary);

    let err = catalog
        .walk_through(&alter_table("t", vec![AlterTableAction::AddConstraint(pk)]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PrimaryKeyExists);
}

#[test]
fn test_drop_primary_key() {
    let mut catalog = mysql_catalog();
    let mut id = column("id", "int");
    id.primary_key = true;
    catalog.walk_through(&create_table("t", vec![id, column("n", "int")])).unwrap();
    catalog
        .walk_through(&alter_table("t", vec![AlterTableAction::DropPrimaryKey]))
        .unwrap();
    assert!(!catalog.final_state().find_table(None, "t").unwrap().has_primary_key());

    let err = catalog
        .walk_through(&alter_table("t", vec![AlterTableAction::DropPrimaryKey]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PrimaryKeyNotExists);
}

#[test]
fn test_blob_default_rejected_on_set_default() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("t", vec![column("id", "int"), column("body", "text")]))
        .unwrap();
    let err = catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::SetDefault {
                column: "body".to_string(),
                default: DefaultClause::Expression("'x'".to_string()),
            }],
        ))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidColumnTypeForDefaultValue);
}

#[test]
fn test_spatial_index_requires_not_null() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("g", "geometry")])).unwrap();
    let mut spatial = TableConstraint::new(TableConstraintKind::Spatial);
    spatial.keys = vec![IndexKey::Column("g".to_string())];
    let err = catalog
        .walk_through(&alter_table("t", vec![AlterTableAction::AddConstraint(spatial)]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SpatialIndexKeyNullable);
}

#[test]
fn test_create_table_like_copies_structure() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("src", vec![column("a", "int"), column("b", "int")]))
        .unwrap();
    catalog.walk_through(&create_index(Some("idx_a"), "src", &["a"])).unwrap();

    catalog
        .walk_through(&Statement::CreateTable(CreateTableStmt {
            name: ObjectName::bare("copy"),
            if_not_exists: false,
            as_select: false,
            like: Some(ObjectName::bare("src")),
            columns: Vec::new(),
            constraints: Vec::new(),
            line: 5,
        }))
        .unwrap();

    let ctx = catalog.final_state().ctx;
    let copy = catalog.final_state().find_table(None, "copy").unwrap();
    assert_eq!(copy.columns.len(), 2);
    assert!(copy.index(ctx, "idx_a").is_some());
}

#[test]
fn test_create_table_as_select_rejected() {
    let mut catalog = mysql_catalog();
    let err = catalog
        .walk_through(&Statement::CreateTable(CreateTableStmt {
            name: ObjectName::bare("t"),
            if_not_exists: false,
            as_select: true,
            like: None,
            columns: Vec::new(),
            constraints: Vec::new(),
            line: 3,
        }))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UseCreateTableAs);
    assert_eq!(err.line, 3);
}

#[test]
fn test_rename_table_statement() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("a", vec![column("x", "int")])).unwrap();
    catalog
        .walk_through(&Statement::RenameTable(RenameTableStmt {
            pairs: vec![RenamePair { from: ObjectName::bare("a"), to: ObjectName::bare("b") }],
            line: 2,
        }))
        .unwrap();
    assert!(catalog.final_state().find_table(None, "a").is_none());
    assert!(catalog.final_state().find_table(None, "b").is_some());
}

#[test]
fn test_rename_table_across_databases() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("x", "int")])).unwrap();
    // Renaming into another database drops the table here.
    catalog
        .walk_through(&Statement::RenameTable(RenameTableStmt {
            pairs: vec![RenamePair {
                from: ObjectName::bare("t"),
                to: ObjectName::in_database("elsewhere", "t"),
            }],
            line: 2,
        }))
        .unwrap();
    assert!(catalog.final_state().find_table(None, "t").is_none());

    // Renaming in from another database cannot see the source.
    let err = catalog
        .walk_through(&Statement::RenameTable(RenameTableStmt {
            pairs: vec![RenamePair {
                from: ObjectName::in_database("elsewhere", "u"),
                to: ObjectName::bare("u"),
            }],
            line: 3,
        }))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableNotExists);
}

#[test]
fn test_change_column_renames_through_indexes() {
    let mut catalog = mysql_catalog();
    catalog
        .walk_through(&create_table("t", vec![column("old", "int"), column("z", "int")]))
        .unwrap();
    catalog.walk_through(&create_index(Some("idx"), "t", &["old"])).unwrap();
    catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::ChangeColumn {
                old_name: "old".to_string(),
                definition: column("new", "bigint"),
                position: None,
            }],
        ))
        .unwrap();

    let ctx = catalog.final_state().ctx;
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert!(table.column(ctx, "new").is_some());
    assert_eq!(table.column(ctx, "new").unwrap().column_type.as_deref(), Some("bigint"));
    assert_eq!(table.index(ctx, "idx").unwrap().expressions, vec!["new".to_string()]);
    assert_eq!(positions(&catalog, "t"), vec![("new".to_string(), 1), ("z".to_string(), 2)]);
}

#[test]
fn test_drop_index_on_table() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("a", "int")])).unwrap();
    catalog.walk_through(&create_index(Some("idx"), "t", &["a"])).unwrap();
    catalog
        .walk_through(&Statement::DropIndex(DropIndexStmt {
            name: "idx".to_string(),
            table: Some(ObjectName::bare("t")),
            schema: None,
            if_exists: false,
            line: 3,
        }))
        .unwrap();
    let ctx = catalog.final_state().ctx;
    assert!(catalog.final_state().find_table(None, "t").unwrap().index(ctx, "idx").is_none());
}

#[test]
fn test_fulltext_index_kind_recorded() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("body", "text")])).unwrap();
    catalog
        .walk_through(&Statement::CreateIndex(catwalk_ast::CreateIndexStmt {
            name: Some("ft".to_string()),
            table: ObjectName::bare("t"),
            kind: IndexKind::Fulltext,
            keys: vec![IndexKey::Column("body".to_string())],
            index_type: None,
            invisible: false,
            if_not_exists: false,
            line: 2,
        }))
        .unwrap();
    let ctx = catalog.final_state().ctx;
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert_eq!(table.index(ctx, "ft").unwrap().index_type.as_deref(), Some("FULLTEXT"));
}

#[test]
fn test_empty_table_comment_distinct_from_unset() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("a", "int")])).unwrap();
    assert_eq!(catalog.final_state().find_table(None, "t").unwrap().comment, None);

    catalog
        .walk_through(&alter_table(
            "t",
            vec![AlterTableAction::SetOption(TableOption::Comment(String::new()))],
        ))
        .unwrap();
    let table = catalog.final_state().find_table(None, "t").unwrap();
    assert_eq!(table.comment.as_deref(), Some(""));
}

#[test]
fn test_index_named_primary_rejected() {
    let mut catalog = mysql_catalog();
    catalog.walk_through(&create_table("t", vec![column("a", "int")])).unwrap();
    let err = catalog
        .walk_through(&create_index(Some("PRIMARY"), "t", &["a"]))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IncorrectIndexName);
}
