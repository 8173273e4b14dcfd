//! In-memory record store
//!
//! Implements both collaborator traits over plain row vectors. Used by the
//! test suite and for embedding drift_sync against non-relational sources.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::store::{RecordSource, RecordTarget, RecordWrite};
use crate::sync::record::Record;
use crate::sync::value::{KeyValue, Value};

/// A record store backed by in-memory row vectors
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: IndexMap<String, Vec<Record>>,
    key_generation: HashMap<String, bool>,
    /// Save operations performed, one per flushed save group
    pub flush_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a table's rows
    pub fn set_rows(&mut self, table: &str, rows: Vec<Record>) {
        self.tables.insert(table.to_string(), rows);
    }

    pub fn rows(&self, table: &str) -> &[Record] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether store-side key generation is currently enabled for a table.
    /// Defaults to enabled, as a relational store would.
    pub fn key_generation_enabled(&self, table: &str) -> bool {
        self.key_generation.get(table).copied().unwrap_or(true)
    }

    fn key_of(record: &Record, key_column: &str) -> Result<KeyValue> {
        let value = record.get(key_column).unwrap_or(&Value::Null);
        KeyValue::try_from(value)
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn count(&self, table: &str) -> Result<u64> {
        Ok(self.rows(table).len() as u64)
    }

    async fn fetch_page(
        &self,
        table: &str,
        key_column: &str,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<Record>> {
        let mut rows = self.rows(table).to_vec();
        // Stable ascending key order guarantees a deterministic traversal
        let mut keyed = rows
            .drain(..)
            .map(|r| Self::key_of(&r, key_column).map(|k| (k, r)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(keyed
            .into_iter()
            .skip(offset as usize)
            .take(limit)
            .map(|(_, r)| r)
            .collect())
    }
}

#[async_trait]
impl RecordTarget for MemoryStore {
    async fn fetch_by_keys(
        &self,
        table: &str,
        key_column: &str,
        keys: &[KeyValue],
    ) -> Result<Vec<Record>> {
        let mut matched = Vec::new();
        for row in self.rows(table) {
            if let Ok(key) = Self::key_of(row, key_column) {
                if keys.contains(&key) {
                    matched.push(row.clone());
                }
            }
        }
        Ok(matched)
    }

    async fn apply(
        &mut self,
        table: &str,
        key_column: &str,
        writes: Vec<RecordWrite>,
    ) -> Result<()> {
        if writes.is_empty() {
            return Ok(());
        }

        let rows = self.tables.entry(table.to_string()).or_default();
        for write in writes {
            match write {
                RecordWrite::Insert(record) => rows.push(record),
                RecordWrite::Update(record) => {
                    let key = Self::key_of(&record, key_column)?;
                    let existing = rows
                        .iter_mut()
                        .find(|r| Self::key_of(r, key_column).map(|k| k == key).unwrap_or(false))
                        .ok_or_else(|| {
                            Error::WriteError(format!(
                                "no row in '{}' with {} = {}",
                                table, key_column, key
                            ))
                        })?;
                    *existing = record;
                }
            }
        }
        self.flush_count += 1;
        Ok(())
    }

    async fn set_key_generation(&mut self, table: &str, enabled: bool) -> Result<()> {
        self.key_generation.insert(table.to_string(), enabled);
        Ok(())
    }
}
