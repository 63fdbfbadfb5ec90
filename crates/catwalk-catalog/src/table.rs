use std::collections::{BTreeSet, HashMap};

use catwalk_ast::ColumnPosition;

use crate::column::ColumnState;
use crate::dialect::WalkThroughContext;
use crate::errors::WalkThroughError;
use crate::ident::fold_identifier;
use crate::index::IndexState;
use crate::view::ViewRef;

/// Catalog state for one table.
///
/// Columns and indexes are keyed by their stored name, which is the
/// source name folded per the engine's key rules. Column positions stay
/// a permutation of `{1..column_count}` whenever integrity checking is
/// on; under lenient integrity the set may contain fabricated columns
/// with position 0 and no renumbering is attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub name: String,
    pub engine: Option<String>,
    pub collation: Option<String>,
    pub comment: Option<String>,
    pub columns: HashMap<String, ColumnState>,
    pub indexes: HashMap<String, IndexState>,
    /// Views that read from this table.
    pub dependent_views: BTreeSet<ViewRef>,
}

impl TableState {
    pub fn new(name: impl Into<String>) -> Self {
        TableState {
            name: name.into(),
            engine: None,
            collation: None,
            comment: None,
            columns: HashMap::new(),
            indexes: HashMap::new(),
            dependent_views: BTreeSet::new(),
        }
    }

    /// A placeholder for a table referenced before its definition was seen.
    pub fn incomplete(name: impl Into<String>) -> Self {
        TableState::new(name)
    }

    fn store_key(&self, ctx: WalkThroughContext, name: &str) -> String {
        fold_identifier(name, ctx.rules().lowercase_keys)
    }

    pub fn column(&self, ctx: WalkThroughContext, name: &str) -> Option<&ColumnState> {
        self.columns.get(&self.store_key(ctx, name))
    }

    pub fn column_mut(&mut self, ctx: WalkThroughContext, name: &str) -> Option<&mut ColumnState> {
        let key = self.store_key(ctx, name);
        self.columns.get_mut(&key)
    }

    pub fn index(&self, ctx: WalkThroughContext, name: &str) -> Option<&IndexState> {
        self.indexes.get(&self.store_key(ctx, name))
    }

    pub fn index_mut(&mut self, ctx: WalkThroughContext, name: &str) -> Option<&mut IndexState> {
        let key = self.store_key(ctx, name);
        self.indexes.get_mut(&key)
    }

    /// Columns ordered by position. Fabricated columns with position 0
    /// sort first.
    pub fn columns_by_position(&self) -> Vec<&ColumnState> {
        let mut columns: Vec<&ColumnState> = self.columns.values().collect();
        columns.sort_by_key(|column| column.position);
        columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    /// How many columns share a base type, e.g. `"varchar"` counts both
    /// `varchar(10)` and `varchar(255)` columns.
    pub fn count_columns_of_type(&self, base: &str) -> usize {
        self.columns
            .values()
            .filter(|column| {
                column
                    .column_type
                    .as_deref()
                    .is_some_and(|column_type| crate::ident::base_type(column_type) == base)
            })
            .count()
    }

    pub fn primary_key(&self) -> Option<&IndexState> {
        self.indexes.values().find(|index| index.primary)
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key().is_some()
    }

    /// MySQL records AUTO_INCREMENT as the column's default expression.
    pub fn has_auto_increment_column(&self) -> bool {
        self.columns.values().any(|column| {
            column
                .default_value
                .as_deref()
                .is_some_and(|default| default.eq_ignore_ascii_case("AUTO_INCREMENT"))
        })
    }

    /// Add a column, appending it unless a position anchor is given and
    /// integrity checking allows renumbering.
    pub fn create_column(
        &mut self,
        ctx: WalkThroughContext,
        mut column: ColumnState,
        position: Option<&ColumnPosition>,
    ) -> Result<(), WalkThroughError> {
        let key = self.store_key(ctx, &column.name);
        if self.columns.contains_key(&key) {
            return Err(WalkThroughError::column_exists(&self.name, &column.name));
        }
        column.name = key.clone();
        column.position = self.columns.len() + 1;
        self.columns.insert(key.clone(), column);
        if let Some(position) = position {
            if ctx.check_integrity {
                self.reposition_column(ctx, &key, position)?;
            }
        }
        Ok(())
    }

    /// Move an existing column to the front or just after an anchor,
    /// renumbering everything in between.
    fn reposition_column(
        &mut self,
        ctx: WalkThroughContext,
        key: &str,
        position: &ColumnPosition,
    ) -> Result<(), WalkThroughError> {
        let target = match position {
            ColumnPosition::First => 1,
            ColumnPosition::After(anchor) => {
                let anchor = self
                    .column(ctx, anchor)
                    .ok_or_else(|| WalkThroughError::column_not_exists(&self.name, anchor))?;
                anchor.position + 1
            }
        };
        let old = self.columns[key].position;
        if target == old {
            return Ok(());
        }
        for column in self.columns.values_mut() {
            if target <= old {
                if column.position >= target && column.position < old {
                    column.position += 1;
                }
            } else if column.position > old && column.position < target {
                column.position -= 1;
            }
        }
        // Moving down lands just before the anchor's new position.
        let landing = if target <= old { target } else { target - 1 };
        if let Some(column) = self.columns.get_mut(key) {
            column.position = landing;
        }
        Ok(())
    }

    /// Drop a column, scrubbing it from every index key list. Indexes
    /// emptied by the scrub are dropped too; their names are returned so
    /// the caller can release them from any shared name space.
    pub fn drop_column(
        &mut self,
        ctx: WalkThroughContext,
        name: &str,
    ) -> Result<Vec<String>, WalkThroughError> {
        let key = self.store_key(ctx, name);
        let Some(column) = self.columns.get(&key) else {
            if ctx.check_integrity {
                return Err(WalkThroughError::column_not_exists(&self.name, name));
            }
            return Ok(Vec::new());
        };
        if ctx.check_integrity && self.columns.len() == 1 {
            return Err(WalkThroughError::drop_all_columns(&self.name, name));
        }
        let dropped_position = column.position;

        let mut emptied = Vec::new();
        for (index_key, index) in &mut self.indexes {
            if index.remove_key(&key) {
                emptied.push(index_key.clone());
            }
        }
        let mut dropped_index_names = Vec::new();
        for index_key in emptied {
            if let Some(index) = self.indexes.remove(&index_key) {
                dropped_index_names.push(index.name);
            }
        }

        self.columns.remove(&key);
        if ctx.check_integrity {
            for column in self.columns.values_mut() {
                if column.position > dropped_position {
                    column.position -= 1;
                }
            }
        }
        Ok(dropped_index_names)
    }

    pub fn rename_column(
        &mut self,
        ctx: WalkThroughContext,
        old: &str,
        new: &str,
    ) -> Result<(), WalkThroughError> {
        let old_key = self.store_key(ctx, old);
        let new_key = self.store_key(ctx, new);
        if old_key == new_key {
            return Ok(());
        }
        if !self.columns.contains_key(&old_key) {
            if ctx.check_integrity {
                return Err(WalkThroughError::column_not_exists(&self.name, old));
            }
            self.create_incomplete_column(&new_key);
            return Ok(());
        }
        if self.columns.contains_key(&new_key) {
            return Err(WalkThroughError::column_exists(&self.name, new));
        }
        let mut column = self.columns.remove(&old_key).unwrap_or_else(|| ColumnState::incomplete(&old_key));
        column.name = new_key.clone();
        self.columns.insert(new_key.clone(), column);
        self.rename_column_in_index_keys(&old_key, &new_key);
        Ok(())
    }

    /// Replace a column's definition, optionally renaming and moving it.
    /// Without an explicit anchor the column keeps its slot.
    pub fn change_column(
        &mut self,
        ctx: WalkThroughContext,
        old: &str,
        new_column: ColumnState,
        position: Option<&ColumnPosition>,
    ) -> Result<(), WalkThroughError> {
        let old_key = self.store_key(ctx, old);
        let new_key = self.store_key(ctx, &new_column.name);
        if !self.columns.contains_key(&old_key) {
            if ctx.check_integrity {
                return Err(WalkThroughError::column_not_exists(&self.name, old));
            }
            // Best effort under lenient integrity: record the new shape.
            self.columns.remove(&new_key);
            let mut column = new_column;
            column.name = new_key.clone();
            self.columns.insert(new_key, column);
            return Ok(());
        }
        if old_key != new_key && self.columns.contains_key(&new_key) {
            return Err(WalkThroughError::column_exists(&self.name, &new_column.name));
        }

        let old_state = self.columns.remove(&old_key).unwrap_or_else(|| ColumnState::incomplete(&old_key));
        let old_position = old_state.position;
        if ctx.check_integrity {
            for column in self.columns.values_mut() {
                if column.position > old_position {
                    column.position -= 1;
                }
            }
        }
        if old_key != new_key {
            self.rename_column_in_index_keys(&old_key, &new_key);
        }

        let anchor;
        let effective_position = match position {
            Some(position) => Some(position),
            None if ctx.check_integrity => {
                if old_position <= 1 {
                    anchor = ColumnPosition::First;
                } else {
                    let previous = self
                        .columns
                        .values()
                        .find(|column| column.position == old_position - 1)
                        .map(|column| column.name.clone())
                        .unwrap_or_default();
                    anchor = ColumnPosition::After(previous);
                }
                Some(&anchor)
            }
            None => None,
        };
        self.create_column(ctx, new_column, effective_position)
    }

    pub fn rename_column_in_index_keys(&mut self, old: &str, new: &str) {
        for index in self.indexes.values_mut() {
            index.rename_key(old, new);
        }
    }

    pub fn create_incomplete_column(&mut self, name: &str) {
        let key = name.to_string();
        self.columns.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(table = %self.name, column = %key, "fabricating incomplete column");
            ColumnState::incomplete(key)
        });
    }

    pub fn create_index(
        &mut self,
        ctx: WalkThroughContext,
        mut index: IndexState,
    ) -> Result<(), WalkThroughError> {
        let key = self.store_key(ctx, &index.name);
        if self.indexes.contains_key(&key) {
            return Err(WalkThroughError::index_exists(&self.name, &index.name));
        }
        index.name = key.clone();
        self.indexes.insert(key, index);
        Ok(())
    }

    pub fn create_incomplete_index(&mut self, ctx: WalkThroughContext, name: &str) {
        let key = self.store_key(ctx, name);
        self.indexes.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(table = %self.name, index = %key, "fabricating incomplete index");
            IndexState::incomplete(key)
        });
    }

    /// Drop an index by name. Returns the removed state so callers can
    /// release shared identifiers.
    pub fn drop_index(
        &mut self,
        ctx: WalkThroughContext,
        name: &str,
    ) -> Result<Option<IndexState>, WalkThroughError> {
        let key = self.store_key(ctx, name);
        if !self.indexes.contains_key(&key) {
            if ctx.check_integrity {
                if let Some(reserved) = ctx.rules().reserved_primary_key_name {
                    if name.eq_ignore_ascii_case(reserved) {
                        return Err(WalkThroughError::primary_key_not_exists(&self.name));
                    }
                }
                return Err(WalkThroughError::index_not_exists(&self.name, name));
            }
            return Ok(None);
        }
        Ok(self.indexes.remove(&key))
    }

    pub fn rename_index(
        &mut self,
        ctx: WalkThroughContext,
        old: &str,
        new: &str,
    ) -> Result<(), WalkThroughError> {
        if let Some(reserved) = ctx.rules().reserved_primary_key_name {
            if old.eq_ignore_ascii_case(reserved) || new.eq_ignore_ascii_case(reserved) {
                return Err(WalkThroughError::incorrect_index_name(reserved));
            }
        }
        let old_key = self.store_key(ctx, old);
        let new_key = self.store_key(ctx, new);
        if !self.indexes.contains_key(&old_key) {
            if ctx.check_integrity {
                return Err(WalkThroughError::index_not_exists(&self.name, old));
            }
            self.create_incomplete_index(ctx, new);
            return Ok(());
        }
        if self.indexes.contains_key(&new_key) {
            return Err(WalkThroughError::index_exists(&self.name, new));
        }
        let mut index = self.indexes.remove(&old_key).unwrap_or_else(|| IndexState::incomplete(&old_key));
        index.name = new_key.clone();
        self.indexes.insert(new_key, index);
        Ok(())
    }
}
