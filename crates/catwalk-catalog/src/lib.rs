//! Catalog - In-Memory Schema State
//!
//! The entity tree the walk-through engine simulates against:
//! database -> schema -> table/view -> column/index. Everything is owned and
//! tree-shaped; views point back at the tables and columns they read through
//! non-owning [`ViewRef`] sets, never through object handles.
//!
//! A [`DatabaseState`] is built once from a [`DatabaseMetadata`] snapshot and
//! then mutated only through the primitives defined here. The same tree is
//! shared conceptually across SQL dialects, so every name lookup routes
//! through the identifier policy in [`ident`] and the per-dialect
//! [`DialectRules`] table.

mod column;
mod database;
mod dialect;
pub mod errors;
pub mod ident;
mod index;
mod metadata;
mod schema;
mod table;
mod view;

pub use column::ColumnState;
pub use database::DatabaseState;
pub use dialect::{DialectRules, EngineDialect, WalkThroughContext};
pub use errors::{ErrorCode, WalkThroughError};
pub use index::IndexState;
pub use metadata::{
    ColumnMetadata, DatabaseMetadata, DependencyColumn, IndexMetadata, SchemaMetadata,
    TableMetadata, ViewMetadata,
};
pub use schema::SchemaState;
pub use table::TableState;
pub use view::{ViewRef, ViewState};
