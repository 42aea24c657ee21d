//! # In-Memory Table Client
//!
//! Process-local tables with the same observable semantics as the managed
//! datastore: `id` and `created_at` are assigned on insert, filters and
//! ordering behave like their PostgREST counterparts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{StorageError, StorageResult};
use super::filter::{FilterExpr, SelectQuery};
use super::TableClient;

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Value>>,
    last_created: Option<DateTime<Utc>>,
}

impl Tables {
    /// Timestamps handed out are strictly increasing, so insertion order and
    /// `created_at` order agree even within one clock tick.
    fn next_created_at(&mut self) -> String {
        let now = Utc::now();
        let ts = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(ts);
        ts.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}

/// In-memory [`TableClient`]
#[derive(Default)]
pub struct MemoryTableClient {
    tables: RwLock<Tables>,
    failure: RwLock<Option<StorageError>>,
    calls: AtomicUsize,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `err` (`None` restores normal
    /// operation)
    pub fn fail_with(&self, err: Option<StorageError>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = err;
        }
    }

    /// Number of client calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of rows currently stored in `table`
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .map(|t| t.rows.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn begin_call(&self) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .read()
            .map_err(|_| StorageError::Transport("Lock poisoned".to_string()))?;
        match failure.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Transport("Lock poisoned".to_string())
}

#[async_trait]
impl TableClient for MemoryTableClient {
    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<Vec<Value>> {
        self.begin_call()?;
        let tables = self.tables.read().map_err(poisoned)?;

        let mut rows: Vec<Value> = tables
            .rows
            .get(table)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();

        rows.sort_by(|a, b| query.compare(a, b));

        Ok(rows.into_iter().map(|r| query.project(r)).collect())
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorageResult<Vec<Value>> {
        self.begin_call()?;
        let mut tables = self.tables.write().map_err(poisoned)?;

        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut obj) = row else {
                return Err(StorageError::rejected("row must be a JSON object"));
            };

            if obj.get("id").map_or(true, Value::is_null) {
                obj.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
            }
            let created_at = tables.next_created_at();
            obj.insert("created_at".to_string(), Value::String(created_at));

            inserted.push(Value::Object(obj));
        }

        tables
            .rows
            .entry(table.to_string())
            .or_default()
            .extend(inserted.iter().cloned());

        Ok(inserted)
    }

    async fn update(
        &self,
        table: &str,
        patch: Map<String, Value>,
        filter: &FilterExpr,
    ) -> StorageResult<Vec<Value>> {
        self.begin_call()?;
        let mut tables = self.tables.write().map_err(poisoned)?;

        let Some(rows) = tables.rows.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|r| filter.matches(r)) {
            if let Some(obj) = row.as_object_mut() {
                for (key, value) in &patch {
                    obj.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }

        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &FilterExpr) -> StorageResult<()> {
        self.begin_call()?;
        let mut tables = self.tables.write().map_err(poisoned)?;

        if let Some(rows) = tables.rows.get_mut(table) {
            rows.retain(|r| !filter.matches(r));
        }

        Ok(())
    }
}
