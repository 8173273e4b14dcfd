//! Record store collaborator contracts
//!
//! The engine never talks to a transport directly; it reads source records
//! and writes destination records through these traits. Implementations own
//! connection and transaction lifecycle.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::sync::record::Record;
use crate::sync::value::KeyValue;

// Re-export key types
pub use memory::MemoryStore;

/// A pending destination write, applied as part of a save group
#[derive(Debug, Clone)]
pub enum RecordWrite {
    Insert(Record),
    Update(Record),
}

/// Read side of a record collection
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Total record count for a table
    async fn count(&self, table: &str) -> Result<u64>;

    /// Fetch one page of records ordered ascending by the key column
    async fn fetch_page(
        &self,
        table: &str,
        key_column: &str,
        offset: u64,
        limit: usize,
    ) -> Result<Vec<Record>>;
}

/// Write side of a record collection
#[async_trait]
pub trait RecordTarget: Send {
    /// Fetch the records whose key column matches any of the given keys
    async fn fetch_by_keys(
        &self,
        table: &str,
        key_column: &str,
        keys: &[KeyValue],
    ) -> Result<Vec<Record>>;

    /// Flush one save group of pending writes as a single save operation.
    /// Updates match existing records on the key column.
    async fn apply(&mut self, table: &str, key_column: &str, writes: Vec<RecordWrite>)
        -> Result<()>;

    /// Toggle store-side key generation for a table. Disabled for the
    /// duration of a sync so explicit key values can be inserted; the engine
    /// restores it on every exit path.
    async fn set_key_generation(&mut self, table: &str, enabled: bool) -> Result<()>;
}
