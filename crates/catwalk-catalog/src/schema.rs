use std::collections::{HashMap, HashSet};

use crate::dialect::WalkThroughContext;
use crate::errors::WalkThroughError;
use crate::ident::identifiers_equal;
use crate::table::TableState;
use crate::view::ViewState;

/// Catalog state for one schema.
///
/// Tables and views are keyed by their source name; lookups compare with
/// the context's name-folding flag so engines with case-insensitive
/// object names resolve `Users` and `users` to the same entry.
///
/// `identifiers` is the per-schema relation name space for engines where
/// tables, views and indexes may not collide. Engines without that rule
/// leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaState {
    pub name: String,
    pub tables: HashMap<String, TableState>,
    pub views: HashMap<String, ViewState>,
    pub identifiers: HashSet<String>,
}

impl SchemaState {
    pub fn new(name: impl Into<String>) -> Self {
        SchemaState {
            name: name.into(),
            tables: HashMap::new(),
            views: HashMap::new(),
            identifiers: HashSet::new(),
        }
    }

    pub fn table_key(&self, ctx: WalkThroughContext, name: &str) -> Option<String> {
        self.tables
            .keys()
            .find(|key| identifiers_equal(key, name, ctx.case_folding))
            .cloned()
    }

    pub fn table(&self, ctx: WalkThroughContext, name: &str) -> Option<&TableState> {
        let key = self.table_key(ctx, name)?;
        self.tables.get(&key)
    }

    pub fn table_mut(&mut self, ctx: WalkThroughContext, name: &str) -> Option<&mut TableState> {
        let key = self.table_key(ctx, name)?;
        self.tables.get_mut(&key)
    }

    pub fn has_table(&self, ctx: WalkThroughContext, name: &str) -> bool {
        self.table_key(ctx, name).is_some()
    }

    pub fn view(&self, name: &str) -> Option<&ViewState> {
        self.views.get(name)
    }

    /// Whether any relation in the shared name space already uses `name`.
    pub fn identifier_in_use(&self, ctx: WalkThroughContext, name: &str) -> bool {
        self.identifiers
            .iter()
            .any(|existing| identifiers_equal(existing, name, ctx.case_folding))
    }

    pub fn register_identifier(&mut self, name: &str) {
        self.identifiers.insert(name.to_string());
    }

    pub fn unregister_identifier(&mut self, name: &str) {
        self.identifiers.remove(name);
    }

    /// Fail when `name` collides in the shared relation name space.
    pub fn check_relation_free(
        &self,
        ctx: WalkThroughContext,
        name: &str,
    ) -> Result<(), WalkThroughError> {
        if ctx.rules().shared_relation_namespace && self.identifier_in_use(ctx, name) {
            return Err(WalkThroughError::relation_exists(name, &self.name));
        }
        Ok(())
    }

    pub fn create_table(
        &mut self,
        ctx: WalkThroughContext,
        table: TableState,
    ) -> Result<(), WalkThroughError> {
        if self.has_table(ctx, &table.name) {
            return Err(WalkThroughError::table_exists(&table.name));
        }
        self.check_relation_free(ctx, &table.name)?;
        self.register_identifier(&table.name);
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    pub fn create_incomplete_table(&mut self, name: &str) -> &mut TableState {
        self.register_identifier(name);
        self.tables.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(schema = %self.name, table = %name, "fabricating incomplete table");
            TableState::incomplete(name)
        })
    }

    /// Remove a table, releasing its name and its index names from the
    /// shared name space.
    pub fn drop_table(
        &mut self,
        ctx: WalkThroughContext,
        name: &str,
    ) -> Result<Option<TableState>, WalkThroughError> {
        let Some(key) = self.table_key(ctx, name) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(name));
            }
            return Ok(None);
        };
        let table = self.tables.remove(&key);
        if let Some(table) = &table {
            self.unregister_identifier(&table.name);
            for index in table.indexes.values() {
                self.unregister_identifier(&index.name);
            }
        }
        Ok(table)
    }

    pub fn rename_table(
        &mut self,
        ctx: WalkThroughContext,
        old: &str,
        new: &str,
    ) -> Result<(), WalkThroughError> {
        let Some(old_key) = self.table_key(ctx, old) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::table_not_exists(old));
            }
            self.create_incomplete_table(new);
            return Ok(());
        };
        if self.has_table(ctx, new) {
            return Err(WalkThroughError::table_exists(new));
        }
        self.check_relation_free(ctx, new)?;
        if let Some(mut table) = self.tables.remove(&old_key) {
            self.unregister_identifier(&table.name);
            table.name = new.to_string();
            self.register_identifier(new);
            self.tables.insert(new.to_string(), table);
        }
        Ok(())
    }

    pub fn create_view(
        &mut self,
        ctx: WalkThroughContext,
        view: ViewState,
    ) -> Result<(), WalkThroughError> {
        self.check_relation_free(ctx, &view.name)?;
        self.register_identifier(&view.name);
        self.views.insert(view.name.clone(), view);
        Ok(())
    }

    pub fn drop_view(&mut self, name: &str) -> Option<ViewState> {
        let view = self.views.remove(name);
        if view.is_some() {
            self.unregister_identifier(name);
        }
        view
    }

    /// Locate an index by name across all tables. Used by engines where
    /// DROP INDEX does not name the owning table.
    pub fn find_index(&self, ctx: WalkThroughContext, name: &str) -> Option<(String, String)> {
        for (table_key, table) in &self.tables {
            for index_key in table.indexes.keys() {
                if identifiers_equal(index_key, name, ctx.case_folding) {
                    return Some((table_key.clone(), index_key.clone()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::EngineDialect;

    fn pg_ctx() -> WalkThroughContext {
        WalkThroughContext::new(EngineDialect::Postgres, true, false)
    }

    #[test]
    fn test_table_lookup_folds_when_asked() {
        let ctx = WalkThroughContext::new(EngineDialect::MySql, true, true);
        let mut schema = SchemaState::new("");
        schema.create_table(ctx, TableState::new("Orders")).unwrap();
        assert!(schema.has_table(ctx, "orders"));
        assert!(schema.has_table(ctx, "ORDERS"));

        let exact = WalkThroughContext::new(EngineDialect::MySql, true, false);
        assert!(!schema.has_table(exact, "orders"));
    }

    #[test]
    fn test_shared_namespace_blocks_view_name_reuse() {
        let ctx = pg_ctx();
        let mut schema = SchemaState::new("public");
        schema.create_view(ctx, ViewState::new("v1", "select 1")).unwrap();
        let err = schema.create_table(ctx, TableState::new("v1")).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::RelationExists);
    }

    #[test]
    fn test_drop_table_releases_index_names() {
        let ctx = pg_ctx();
        let mut schema = SchemaState::new("public");
        let mut table = TableState::new("t");
        table
            .create_index(ctx, crate::index::IndexState::new("t_pkey", vec!["id".to_string()]))
            .unwrap();
        schema.create_table(ctx, table).unwrap();
        schema.register_identifier("t_pkey");
        assert!(schema.identifier_in_use(ctx, "t_pkey"));

        schema.drop_table(ctx, "t").unwrap();
        assert!(!schema.identifier_in_use(ctx, "t"));
        assert!(!schema.identifier_in_use(ctx, "t_pkey"));
    }

    #[test]
    fn test_rename_missing_table_lenient_fabricates() {
        let mut ctx = pg_ctx();
        ctx.check_integrity = false;
        let mut schema = SchemaState::new("public");
        schema.rename_table(ctx, "ghost", "solid").unwrap();
        assert!(schema.has_table(ctx, "solid"));
    }

    #[test]
    fn test_find_index_scans_tables() {
        let ctx = pg_ctx();
        let mut schema = SchemaState::new("public");
        let mut table = TableState::new("t");
        table
            .create_index(ctx, crate::index::IndexState::new("t_a_idx", vec!["a".to_string()]))
            .unwrap();
        schema.create_table(ctx, table).unwrap();
        assert_eq!(
            schema.find_index(ctx, "t_a_idx"),
            Some(("t".to_string(), "t_a_idx".to_string()))
        );
        assert_eq!(schema.find_index(ctx, "nope"), None);
    }
}
