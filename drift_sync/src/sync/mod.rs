//! Reconciliation module
//!
//! Paged, idempotent record synchronization between structurally-similar
//! table pairs, with resumable cross-run progress tracking.

pub mod engine;
pub mod pairing;
pub mod record;
pub mod tracker;
pub mod value;

// Re-export key types
pub use engine::{SyncEngine, SyncSummary};
pub use pairing::{PairRegistry, TablePair};
pub use record::{FieldMap, Record};
pub use tracker::{
    processing_order, JsonFileTracker, MemoryTracker, ProgressTracker, TableSyncState,
};
pub use value::{KeyValue, Value};
