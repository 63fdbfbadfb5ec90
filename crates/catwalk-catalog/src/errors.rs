//! Structured walk-through errors.
//!
//! Every failure carries a numeric code from a fixed range (100s parse,
//! 200s database, 300s table, 400s column, 500s index, 700s schema,
//! 800s relation, 900s constraint; the 600s insert range belongs to the
//! out-of-scope DML checks), a human-readable content string, a 1-based
//! line attributed by the dispatcher when the applier left it zero, and an
//! optional payload with structured extra data such as blocking view names.

use thiserror::Error;

/// Walk-through error kinds with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    Unsupported = 1,
    Internal = 2,
    InvalidStatement = 3,

    ParseError = 101,
    DeparseError = 102,

    AccessOtherDatabase = 201,
    DatabaseIsDeleted = 202,

    TableExists = 301,
    TableNotExists = 302,
    UseCreateTableAs = 303,
    TableIsReferencedByView = 304,

    ColumnExists = 401,
    ColumnNotExists = 402,
    DropAllColumns = 403,
    AutoIncrementExists = 404,
    OnUpdateColumnNotDatetimeOrTimestamp = 405,
    SetNullDefaultForNotNullColumn = 406,
    InvalidColumnTypeForDefaultValue = 407,
    ColumnIsReferencedByView = 408,

    PrimaryKeyExists = 501,
    IndexExists = 502,
    IndexEmptyKeys = 503,
    PrimaryKeyNotExists = 504,
    IndexNotExists = 505,
    IncorrectIndexName = 506,
    SpatialIndexKeyNullable = 507,

    SchemaExists = 701,
    SchemaNotExists = 702,

    RelationExists = 801,

    ConstraintNotExists = 901,
}

impl ErrorCode {
    /// The numeric code surfaced to consumers.
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Error produced by applying one statement to a database state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{content}")]
pub struct WalkThroughError {
    pub code: ErrorCode,
    pub content: String,
    /// 1-based source line; 0 until the dispatcher attributes it.
    pub line: usize,
    /// Structured extra data, e.g. the views blocking a DROP.
    pub payload: Vec<String>,
}

impl WalkThroughError {
    pub fn new(code: ErrorCode, content: impl Into<String>) -> Self {
        WalkThroughError { code, content: content.into(), line: 0, payload: Vec::new() }
    }

    pub fn with_payload(mut self, payload: Vec<String>) -> Self {
        self.payload = payload;
        self
    }

    pub fn table_exists(table: &str) -> Self {
        Self::new(ErrorCode::TableExists, format!("Table `{table}` already exists"))
    }

    pub fn table_not_exists(table: &str) -> Self {
        Self::new(ErrorCode::TableNotExists, format!("Table `{table}` does not exist"))
    }

    pub fn column_exists(table: &str, column: &str) -> Self {
        Self::new(
            ErrorCode::ColumnExists,
            format!("Column `{column}` already exists in table `{table}`"),
        )
    }

    pub fn column_not_exists(table: &str, column: &str) -> Self {
        Self::new(
            ErrorCode::ColumnNotExists,
            format!("Column `{column}` does not exist in table `{table}`"),
        )
    }

    pub fn index_exists(table: &str, index: &str) -> Self {
        Self::new(
            ErrorCode::IndexExists,
            format!("Index `{index}` already exists in table `{table}`"),
        )
    }

    pub fn index_not_exists(table: &str, index: &str) -> Self {
        Self::new(
            ErrorCode::IndexNotExists,
            format!("Index `{index}` does not exist in table `{table}`"),
        )
    }

    pub fn access_other_database(current: &str, target: &str) -> Self {
        Self::new(
            ErrorCode::AccessOtherDatabase,
            format!("Database `{target}` is not the current database `{current}`"),
        )
    }

    pub fn database_is_deleted(database: &str) -> Self {
        Self::new(ErrorCode::DatabaseIsDeleted, format!("Database `{database}` is deleted"))
    }

    pub fn schema_exists(schema: &str) -> Self {
        Self::new(ErrorCode::SchemaExists, format!("Schema \"{schema}\" already exists"))
    }

    pub fn schema_not_exists(schema: &str) -> Self {
        Self::new(ErrorCode::SchemaNotExists, format!("Schema \"{schema}\" does not exist"))
    }

    pub fn relation_exists(relation: &str, schema: &str) -> Self {
        Self::new(
            ErrorCode::RelationExists,
            format!("Relation \"{relation}\" already exists in schema \"{schema}\""),
        )
    }

    pub fn drop_all_columns(table: &str, column: &str) -> Self {
        Self::new(
            ErrorCode::DropAllColumns,
            format!("Cannot drop column `{column}`: dropping all columns in table `{table}` is not allowed"),
        )
    }

    pub fn primary_key_exists(table: &str) -> Self {
        Self::new(
            ErrorCode::PrimaryKeyExists,
            format!("Primary key already exists in table `{table}`"),
        )
    }

    pub fn primary_key_not_exists(table: &str) -> Self {
        Self::new(
            ErrorCode::PrimaryKeyNotExists,
            format!("Primary key does not exist in table `{table}`"),
        )
    }

    pub fn incorrect_index_name(index: &str) -> Self {
        Self::new(ErrorCode::IncorrectIndexName, format!("Incorrect index name `{index}`"))
    }

    pub fn index_empty_keys(table: &str, index: &str) -> Self {
        Self::new(
            ErrorCode::IndexEmptyKeys,
            format!("Index `{index}` in table `{table}` has empty key"),
        )
    }

    pub fn spatial_index_key_nullable(column: &str) -> Self {
        Self::new(
            ErrorCode::SpatialIndexKeyNullable,
            format!("All parts of a SPATIAL index must be NOT NULL, but `{column}` is nullable"),
        )
    }

    pub fn use_create_table_as(statement: &str) -> Self {
        Self::new(
            ErrorCode::UseCreateTableAs,
            format!("Disallow the CREATE TABLE AS statement, but \"{statement}\" uses"),
        )
    }

    pub fn table_referenced_by_views(schema: &str, table: &str, views: &[String]) -> Self {
        Self::new(
            ErrorCode::TableIsReferencedByView,
            format!(
                "Table \"{schema}\".\"{table}\" is referenced by views {}",
                views.join(", ")
            ),
        )
        .with_payload(views.to_vec())
    }

    pub fn column_referenced_by_views(table: &str, column: &str, views: &[String]) -> Self {
        Self::new(
            ErrorCode::ColumnIsReferencedByView,
            format!(
                "Column \"{column}\" in table \"{table}\" is referenced by views {}",
                views.join(", ")
            ),
        )
        .with_payload(views.to_vec())
    }

    pub fn auto_increment_exists(table: &str) -> Self {
        Self::new(
            ErrorCode::AutoIncrementExists,
            format!("There can be only one auto column for table `{table}`"),
        )
    }

    pub fn on_update_not_time_column(column: &str, column_type: &str) -> Self {
        Self::new(
            ErrorCode::OnUpdateColumnNotDatetimeOrTimestamp,
            format!(
                "Column `{column}` use ON UPDATE but is {column_type}, not DATETIME or TIMESTAMP"
            ),
        )
    }

    pub fn set_null_default_for_not_null_column(table: &str, column: &str) -> Self {
        Self::new(
            ErrorCode::SetNullDefaultForNotNullColumn,
            format!("Cannot set NULL default for NOT NULL column `{column}` in table `{table}`"),
        )
    }

    pub fn invalid_column_type_for_default(column: &str, column_type: &str) -> Self {
        Self::new(
            ErrorCode::InvalidColumnTypeForDefaultValue,
            format!("Cannot set default value for column `{column}` of type {column_type}"),
        )
    }

    pub fn constraint_not_exists(table: &str, constraint: &str) -> Self {
        Self::new(
            ErrorCode::ConstraintNotExists,
            format!("Constraint \"{constraint}\" of relation \"{table}\" does not exist"),
        )
    }
}
