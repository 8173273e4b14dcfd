//! Reconciliation engine
//!
//! Performs the paginated copy for one table pair: count source records,
//! page through them ordered by primary key, resolve destination records in
//! keyed lookup batches, classify each source record as insert, update, or
//! no-op, and flush writes in bounded save groups.

use std::collections::HashMap;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::store::{RecordSource, RecordTarget, RecordWrite};
use crate::sync::pairing::TablePair;
use crate::sync::record::Record;
use crate::sync::value::KeyValue;

/// Outcome of synchronizing one table pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub inserted: u64,
    pub updated: u64,
    pub unchanged: u64,
}

/// Paginated, idempotent record reconciliation for table pairs
pub struct SyncEngine {
    config: SyncConfig,
}

impl SyncEngine {
    /// Create a new engine with the given sizing configuration
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Synchronize one table pair from source to destination.
    ///
    /// Writes already flushed are not rolled back on error; the caller skips
    /// the progress update instead, so the pair is retried from the
    /// beginning on the next run.
    pub async fn synchronize(
        &self,
        source: &dyn RecordSource,
        destination: &mut dyn RecordTarget,
        pair: &TablePair,
    ) -> Result<SyncSummary> {
        if pair.destination_key_generated {
            destination
                .set_key_generation(&pair.table_name, false)
                .await?;
        }

        let outcome = self.copy_pages(source, destination, pair).await;

        // Key generation must come back on for every exit path. A failure
        // here must not mask the original error from the page loop.
        if pair.destination_key_generated {
            if let Err(restore_error) = destination.set_key_generation(&pair.table_name, true).await
            {
                tracing::error!(
                    table = %pair.table_name,
                    error = %restore_error,
                    "Failed to re-enable key generation"
                );
                outcome?;
                return Err(restore_error);
            }
        }

        outcome
    }

    async fn copy_pages(
        &self,
        source: &dyn RecordSource,
        destination: &mut dyn RecordTarget,
        pair: &TablePair,
    ) -> Result<SyncSummary> {
        let table = pair.table_name.as_str();
        let key_column = pair.key_column.as_str();

        let total = source.count(table).await?;
        let page_size = self.config.page_size as u64;
        let total_pages = total.div_ceil(page_size);

        let mut summary = SyncSummary::default();

        for page in 0..total_pages {
            let source_page = source
                .fetch_page(table, key_column, page * page_size, self.config.page_size)
                .await?;

            let page_keys = source_page
                .iter()
                .map(|record| self.record_key(record, key_column))
                .collect::<Result<Vec<_>>>()?;

            let destination_index = self
                .lookup_destination(destination, table, key_column, &page_keys)
                .await?;

            let mut pending: Vec<RecordWrite> = Vec::new();
            let mut page_inserted = 0u64;
            let mut page_updated = 0u64;

            for (source_record, key) in source_page.iter().zip(&page_keys) {
                match destination_index.get(&key.to_string()) {
                    Some(existing) => {
                        if pair.field_map.records_equal(source_record, existing) {
                            summary.unchanged += 1;
                        } else {
                            let mut updated = existing.clone();
                            pair.field_map.copy(source_record, &mut updated)?;
                            pending.push(RecordWrite::Update(updated));
                            summary.updated += 1;
                            page_updated += 1;
                        }
                    }
                    None => {
                        let mut fresh = Record::empty_for(&pair.destination_table);
                        pair.field_map.copy(source_record, &mut fresh)?;
                        pending.push(RecordWrite::Insert(fresh));
                        summary.inserted += 1;
                        page_inserted += 1;
                    }
                }

                if pending.len() >= self.config.save_group_size {
                    destination
                        .apply(table, key_column, std::mem::take(&mut pending))
                        .await?;
                }
            }

            if !pending.is_empty() {
                destination.apply(table, key_column, pending).await?;
            }

            tracing::info!(
                table = table,
                page = page + 1,
                total_pages = total_pages,
                inserted = page_inserted,
                updated = page_updated,
                "Processed page"
            );
        }

        Ok(summary)
    }

    fn record_key(&self, record: &Record, key_column: &str) -> Result<KeyValue> {
        let value = record.get(key_column).ok_or_else(|| {
            crate::error::Error::MissingRecord(format!(
                "source record has no key field '{}'",
                key_column
            ))
        })?;
        KeyValue::try_from(value)
    }

    /// Resolve destination records for the page's keys, batching lookups to
    /// bound the size of any single query.
    async fn lookup_destination(
        &self,
        destination: &mut dyn RecordTarget,
        table: &str,
        key_column: &str,
        keys: &[KeyValue],
    ) -> Result<HashMap<String, Record>> {
        let mut index = HashMap::new();

        for batch in keys.chunks(self.config.lookup_batch_size) {
            crate::sync::value::ensure_homogeneous(batch)?;
            let records = destination.fetch_by_keys(table, key_column, batch).await?;
            for record in records {
                let key = self.record_key(&record, key_column)?;
                index.insert(key.to_string(), record);
            }
        }

        Ok(index)
    }
}
