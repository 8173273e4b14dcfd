//! Progress tracking
//!
//! Keyed store of last-synchronized timestamps per table, used to order a
//! run so the stalest data refreshes first. The engine only depends on the
//! trait; the JSON file implementation matches what a thin driver needs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Last successful sync of one table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSyncState {
    pub table_name: String,
    pub last_updated: DateTime<Utc>,
}

/// Keyed store of per-table sync timestamps
#[async_trait]
pub trait ProgressTracker: Send {
    /// All known sync states, oldest first
    async fn read_all(&self) -> Result<Vec<TableSyncState>>;

    /// Create or update the state for a table. Idempotent: a read
    /// immediately after yields the written value.
    async fn upsert(&mut self, table_name: &str, timestamp: DateTime<Utc>) -> Result<()>;
}

/// Progress tracker persisted as a pretty-printed JSON array file.
/// A missing file reads as no state; every upsert rewrites the file.
pub struct JsonFileTracker {
    path: PathBuf,
}

impl JsonFileTracker {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<TableSyncState>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let states: Vec<TableSyncState> = serde_json::from_str(&content)
            .map_err(|e| Error::TrackerError(format!("Malformed tracker state file: {}", e)))?;
        Ok(states)
    }

    fn save(&self, states: &[TableSyncState]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(states)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[async_trait]
impl ProgressTracker for JsonFileTracker {
    async fn read_all(&self) -> Result<Vec<TableSyncState>> {
        let mut states = self.load()?;
        states.sort_by_key(|s| s.last_updated);
        Ok(states)
    }

    async fn upsert(&mut self, table_name: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let mut states = self.load()?;
        match states.iter_mut().find(|s| s.table_name == table_name) {
            Some(existing) => existing.last_updated = timestamp,
            None => states.push(TableSyncState {
                table_name: table_name.to_string(),
                last_updated: timestamp,
            }),
        }
        self.save(&states)
    }
}

/// In-memory progress tracker for tests and embedded runs
#[derive(Debug, Default)]
pub struct MemoryTracker {
    states: Vec<TableSyncState>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressTracker for MemoryTracker {
    async fn read_all(&self) -> Result<Vec<TableSyncState>> {
        let mut states = self.states.clone();
        states.sort_by_key(|s| s.last_updated);
        Ok(states)
    }

    async fn upsert(&mut self, table_name: &str, timestamp: DateTime<Utc>) -> Result<()> {
        match self.states.iter_mut().find(|s| s.table_name == table_name) {
            Some(existing) => existing.last_updated = timestamp,
            None => self.states.push(TableSyncState {
                table_name: table_name.to_string(),
                last_updated: timestamp,
            }),
        }
        Ok(())
    }
}

/// Order table names for a run: tables never synced come first,
/// alphabetically; previously-synced tables follow, oldest first.
pub fn processing_order(table_names: &[String], states: &[TableSyncState]) -> Vec<String> {
    let last_updated: HashMap<&str, DateTime<Utc>> = states
        .iter()
        .map(|s| (s.table_name.as_str(), s.last_updated))
        .collect();

    let mut never_synced: Vec<String> = table_names
        .iter()
        .filter(|name| !last_updated.contains_key(name.as_str()))
        .cloned()
        .collect();
    never_synced.sort();

    let mut already_synced: Vec<String> = table_names
        .iter()
        .filter(|name| last_updated.contains_key(name.as_str()))
        .cloned()
        .collect();
    already_synced.sort_by_key(|name| last_updated[name.as_str()]);

    never_synced.extend(already_synced);
    never_synced
}
