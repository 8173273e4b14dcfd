//! drift_sync: schema drift detection and data reconciliation for relational stores
//!
//! drift_sync compares two relational schema snapshots, generates corrective
//! schema statements for the structural drift it finds, and performs a
//! paginated, idempotent copy of records from source to destination while
//! tracking per-table progress across runs.

pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod store;
pub mod sync;
pub mod utils;

#[cfg(test)]
mod test;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use error::{Error, Result};
pub use schema::diff::{compare, DifferenceReport};
pub use schema::generator::ScriptGenerator;
pub use schema::introspect::SchemaIntrospector;
pub use schema::types::{Column, LogicalType, SchemaModel, Table};
pub use store::{MemoryStore, RecordSource, RecordTarget, RecordWrite};
pub use sync::engine::{SyncEngine, SyncSummary};
pub use sync::tracker::{JsonFileTracker, MemoryTracker, ProgressTracker};

use chrono::Utc;
use sync::pairing::{PairRegistry, TablePair};
use sync::tracker::processing_order;

/// Initialize drift_sync from a configuration file
pub fn init(config_path: &str) -> Result<DriftSync> {
    let config = config::load_from_file(config_path)?;
    utils::init_logging(&config.logging)?;
    Ok(DriftSync::new(config))
}

/// Per-table outcome of a synchronization run
#[derive(Debug)]
pub struct TableOutcome {
    pub table_name: String,
    pub result: Result<SyncSummary>,
}

/// Outcome of a whole synchronization run, one entry per table pair
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TableOutcome>,
}

impl RunReport {
    /// True when every table pair synchronized without error
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// The main client: drift detection, script generation, and ordered
/// synchronization runs with per-pair failure isolation
pub struct DriftSync {
    config: Config,
    tracker: Box<dyn ProgressTracker>,
    engine: SyncEngine,
}

impl DriftSync {
    /// Create a client with a JSON file progress tracker from configuration
    pub fn new(config: Config) -> Self {
        let tracker = Box::new(JsonFileTracker::new(&config.tracker.state_file));
        Self::with_tracker(config, tracker)
    }

    /// Create a client with a caller-supplied progress tracker
    pub fn with_tracker(config: Config, tracker: Box<dyn ProgressTracker>) -> Self {
        let engine = SyncEngine::new(config.sync.clone());
        Self {
            config,
            tracker,
            engine,
        }
    }

    /// Compare two schema models, including the primary key and default
    /// value gaps the script generator consumes
    pub fn diff(&self, source: &SchemaModel, destination: &SchemaModel) -> DifferenceReport {
        let mut report = schema::diff::compare(source, destination);
        schema::generator::collect_missing_primary_keys(source, destination, &mut report);
        schema::generator::collect_missing_default_values(source, &mut report);
        report
    }

    /// Generate the corrective script for the drift between two models
    pub fn script(&self, source: &SchemaModel, destination: &SchemaModel) -> Result<Vec<String>> {
        let report = self.diff(source, destination);
        ScriptGenerator::generate(source, &report)
    }

    /// Synchronize every table pair the two models share, stalest first.
    ///
    /// A pair that fails is logged and recorded in the report; later pairs
    /// still run. Only pairs that complete get a progress update, so a
    /// failed pair is retried from the beginning next run.
    pub async fn sync_all(
        &mut self,
        source_model: &SchemaModel,
        destination_model: &SchemaModel,
        source: &dyn RecordSource,
        destination: &mut dyn RecordTarget,
    ) -> Result<RunReport> {
        let shared = PairRegistry::shared_table_names(source_model, destination_model);
        let states = self.tracker.read_all().await?;
        let ordered = processing_order(&shared, &states);

        let mut report = RunReport::default();

        for table_name in ordered {
            let result = self
                .sync_pair(&table_name, source_model, destination_model, source, destination)
                .await;

            match &result {
                Ok(summary) => {
                    tracing::info!(
                        table = %table_name,
                        inserted = summary.inserted,
                        updated = summary.updated,
                        unchanged = summary.unchanged,
                        "Table synchronized"
                    );
                    self.tracker.upsert(&table_name, Utc::now()).await?;
                }
                Err(error) => {
                    tracing::error!(table = %table_name, error = %error, "Table pair failed");
                }
            }

            report.outcomes.push(TableOutcome { table_name, result });
        }

        Ok(report)
    }

    async fn sync_pair(
        &self,
        table_name: &str,
        source_model: &SchemaModel,
        destination_model: &SchemaModel,
        source: &dyn RecordSource,
        destination: &mut dyn RecordTarget,
    ) -> Result<SyncSummary> {
        let pair = TablePair::resolve(table_name, source_model, destination_model)?;
        self.engine.synchronize(source, destination, &pair).await
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Known per-table sync states, oldest first
    pub async fn tracker_states(&self) -> Result<Vec<sync::tracker::TableSyncState>> {
        self.tracker.read_all().await
    }
}
