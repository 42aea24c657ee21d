//! # Table Storage Client
//!
//! The catalog never talks to a database directly. It goes through a
//! [`TableClient`], a table-oriented collaborator offering `select` with
//! filtering and ordering, `insert`, and `update`/`delete` filtered by
//! equality. Rows travel as JSON objects.
//!
//! Implementations:
//!
//! - [`PostgrestClient`] - the managed datastore's REST interface
//! - [`MemoryTableClient`] - in-process tables for development and tests

mod errors;
mod filter;
mod memory;
mod postgrest;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use errors::{StorageError, StorageResult};
pub use filter::{Direction, FilterExpr, OrderBy, SelectQuery};
pub use memory::MemoryTableClient;
pub use postgrest::{PostgrestClient, PostgrestConfig};

/// Table-access client trait
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Read rows matching the query, in the query's order
    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<Vec<Value>>;

    /// Insert rows and return them as stored
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorageResult<Vec<Value>>;

    /// Overwrite the patch's columns on every matching row; returns the
    /// updated rows
    async fn update(
        &self,
        table: &str,
        patch: Map<String, Value>,
        filter: &FilterExpr,
    ) -> StorageResult<Vec<Value>>;

    /// Remove every matching row. Matching nothing is not an error.
    async fn delete(&self, table: &str, filter: &FilterExpr) -> StorageResult<()>;
}
