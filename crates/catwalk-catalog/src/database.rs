use std::collections::{BTreeSet, HashMap};

use crate::dialect::WalkThroughContext;
use crate::errors::WalkThroughError;
use crate::ident::identifiers_equal;
use crate::schema::SchemaState;
use crate::table::TableState;
use crate::view::ViewRef;

/// In-memory catalog state for one database.
///
/// The simulation context is fixed at construction and threaded into
/// every primitive so one database never mixes dialect rules.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseState {
    pub name: String,
    pub character_set: String,
    pub collation: String,
    pub ctx: WalkThroughContext,
    pub schemas: HashMap<String, SchemaState>,
    /// Set by DROP DATABASE. Every later statement fails.
    pub deleted: bool,
    /// Cleared when a lenient walk-through had to give up and reset.
    pub usable: bool,
}

impl DatabaseState {
    /// An empty database holding just the dialect's default schema.
    pub fn empty(name: impl Into<String>, ctx: WalkThroughContext) -> Self {
        let default_schema = ctx.rules().default_schema;
        let mut schemas = HashMap::new();
        schemas.insert(default_schema.to_string(), SchemaState::new(default_schema));
        DatabaseState {
            name: name.into(),
            character_set: String::new(),
            collation: String::new(),
            ctx,
            schemas,
            deleted: false,
            usable: true,
        }
    }

    pub fn is_current_database(&self, name: &str) -> bool {
        identifiers_equal(&self.name, name, self.ctx.case_folding)
    }

    fn resolve_schema<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        name.unwrap_or(self.ctx.rules().default_schema)
    }

    pub fn schema(&self, name: Option<&str>) -> Option<&SchemaState> {
        self.schemas.get(self.resolve_schema(name))
    }

    pub fn schema_mut(&mut self, name: Option<&str>) -> Option<&mut SchemaState> {
        let key = self.resolve_schema(name).to_string();
        self.schemas.get_mut(&key)
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Resolve a schema for DDL. The default schema is created on first
    /// touch; any other missing schema is an error.
    pub fn ensure_schema(
        &mut self,
        name: Option<&str>,
    ) -> Result<&mut SchemaState, WalkThroughError> {
        let key = self.resolve_schema(name).to_string();
        if !self.schemas.contains_key(&key) && key != self.ctx.rules().default_schema {
            return Err(WalkThroughError::schema_not_exists(&key));
        }
        Ok(self.schemas.entry(key.clone()).or_insert_with(|| SchemaState::new(&key)))
    }

    pub fn create_schema(&mut self, name: &str) -> Result<&mut SchemaState, WalkThroughError> {
        if self.schemas.contains_key(name) {
            return Err(WalkThroughError::schema_exists(name));
        }
        Ok(self.schemas.entry(name.to_string()).or_insert_with(|| SchemaState::new(name)))
    }

    pub fn remove_schema(&mut self, name: &str) -> Option<SchemaState> {
        self.schemas.remove(name)
    }

    pub fn find_table(&self, schema: Option<&str>, table: &str) -> Option<&TableState> {
        self.schema(schema)?.table(self.ctx, table)
    }

    /// The subset of `refs` that still resolve to live views, rendered as
    /// `"schema"."view"` in stable order.
    pub fn existing_views(&self, refs: &BTreeSet<ViewRef>) -> Vec<String> {
        refs.iter()
            .filter(|view_ref| {
                self.schemas
                    .get(&view_ref.schema)
                    .is_some_and(|schema| schema.view(&view_ref.view).is_some())
            })
            .map(|view_ref| view_ref.to_string())
            .collect()
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Throw the simulated state away and keep only an empty default
    /// schema. Used when a lenient walk-through cannot continue.
    pub fn reset_unusable(&mut self) {
        let default_schema = self.ctx.rules().default_schema;
        self.schemas.clear();
        self.schemas.insert(default_schema.to_string(), SchemaState::new(default_schema));
        self.usable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{EngineDialect, WalkThroughContext};
    use crate::view::ViewState;

    fn pg_db() -> DatabaseState {
        DatabaseState::empty("db", WalkThroughContext::new(EngineDialect::Postgres, true, false))
    }

    #[test]
    fn test_empty_database_has_default_schema() {
        let db = pg_db();
        assert!(db.has_schema("public"));
        let mysql = DatabaseState::empty(
            "db",
            WalkThroughContext::new(EngineDialect::MySql, true, true),
        );
        assert!(mysql.has_schema(""));
    }

    #[test]
    fn test_ensure_schema_auto_creates_default_only() {
        let mut db = pg_db();
        db.remove_schema("public");
        assert!(db.ensure_schema(None).is_ok());
        let err = db.ensure_schema(Some("audit")).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::SchemaNotExists);
    }

    #[test]
    fn test_current_database_folding() {
        let mut db = pg_db();
        assert!(db.is_current_database("db"));
        assert!(!db.is_current_database("DB"));
        db.ctx.case_folding = true;
        assert!(db.is_current_database("DB"));
    }

    #[test]
    fn test_existing_views_filters_dropped() {
        let mut db = pg_db();
        let ctx = db.ctx;
        db.ensure_schema(None)
            .unwrap()
            .create_view(ctx, ViewState::new("v1", "select 1"))
            .unwrap();
        let mut refs = BTreeSet::new();
        refs.insert(ViewRef::new("public", "v1"));
        refs.insert(ViewRef::new("public", "gone"));
        assert_eq!(db.existing_views(&refs), vec!["\"public\".\"v1\"".to_string()]);
    }

    #[test]
    fn test_reset_unusable() {
        let mut db = pg_db();
        let ctx = db.ctx;
        db.ensure_schema(None)
            .unwrap()
            .create_table(ctx, TableState::new("t"))
            .unwrap();
        db.reset_unusable();
        assert!(!db.usable);
        assert!(db.has_schema("public"));
        assert!(db.find_table(None, "t").is_none());
    }
}
