//! The walk-through façade.

use catwalk_ast::Statement;
use catwalk_catalog::{DatabaseMetadata, DatabaseState, WalkThroughContext, WalkThroughError};

use crate::walk::walk_statement;

/// A simulated catalog: the snapshot it started from plus the state
/// after every statement walked so far. Statements only ever touch the
/// final state; the origin stays readable for before/after comparisons.
#[derive(Debug, Clone)]
pub struct Catalog {
    origin: DatabaseState,
    final_state: DatabaseState,
}

impl Catalog {
    /// Build a catalog from a database snapshot.
    pub fn new(metadata: &DatabaseMetadata, ctx: WalkThroughContext) -> Self {
        let origin = DatabaseState::from_metadata(metadata, ctx);
        let final_state = origin.clone();
        Catalog { origin, final_state }
    }

    /// A catalog over an empty database, for walking scripts that build
    /// everything from scratch.
    pub fn empty(name: impl Into<String>, ctx: WalkThroughContext) -> Self {
        let origin = DatabaseState::empty(name, ctx);
        let final_state = origin.clone();
        Catalog { origin, final_state }
    }

    pub fn origin(&self) -> &DatabaseState {
        &self.origin
    }

    pub fn final_state(&self) -> &DatabaseState {
        &self.final_state
    }

    /// Apply one statement to the final state.
    ///
    /// Under lenient integrity a PostgreSQL walk that still cannot apply
    /// a statement gives up quietly: the state resets to an empty
    /// default schema, is marked unusable and the statement reports
    /// success. Other configurations surface the error as-is.
    pub fn walk_through(&mut self, statement: &Statement) -> Result<(), WalkThroughError> {
        match walk_statement(&mut self.final_state, statement) {
            Ok(()) => Ok(()),
            Err(err) => {
                let ctx = self.final_state.ctx;
                if ctx.dialect.is_postgres() && !ctx.check_integrity {
                    tracing::debug!(code = err.code.code(), "lenient walk reset after failure");
                    self.final_state.reset_unusable();
                    return Ok(());
                }
                Err(err)
            }
        }
    }

    /// Apply a whole script, stopping at the first failure.
    pub fn walk_through_all(&mut self, statements: &[Statement]) -> Result<(), WalkThroughError> {
        for statement in statements {
            self.walk_through(statement)?;
        }
        Ok(())
    }
}
