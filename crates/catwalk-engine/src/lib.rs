//! Walk-Through Engine
//!
//! Applies parsed DDL statements one at a time to an in-memory catalog,
//! simulating what a database engine would accept or reject without
//! running anything. Each statement either mutates the state or comes
//! back as a [`WalkThroughError`] carrying a numeric code and the source
//! line it failed on.
//!
//! The entry point is [`Catalog`]: build it from a snapshot (or empty),
//! then feed it statements. Dialect differences are data, carried by the
//! [`WalkThroughContext`] the catalog was created with.

mod alter;
mod catalog;
mod constraints;
mod create_index;
mod create_table;
mod database_ddl;
mod drop_index;
mod drop_table;
mod naming;
mod rename_table;
mod schema_ddl;
mod validation;
mod view_ddl;
mod walk;

pub use catalog::Catalog;
pub use walk::walk_statement;

pub use catwalk_catalog::{
    DatabaseMetadata, DatabaseState, EngineDialect, ErrorCode, WalkThroughContext,
    WalkThroughError,
};

#[cfg(test)]
mod tests;
