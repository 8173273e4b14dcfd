//! Table pair resolution
//!
//! Matches tables between two schema models by name and resolves, once per
//! pair, everything the engine needs per record: the key column, whether the
//! destination key is store-generated, and the field-mapping table.

use crate::error::{Error, Result};
use crate::sync::record::FieldMap;
use crate::schema::types::{SchemaModel, Table};

/// A resolved (source table, destination table) association
#[derive(Debug, Clone)]
pub struct TablePair {
    pub table_name: String,
    pub source_table: Table,
    pub destination_table: Table,
    pub field_map: FieldMap,
    /// Single primary key column; composite keys are rejected at resolution
    pub key_column: String,
    /// True when the destination key is store-generated and must be
    /// disabled for the duration of the sync
    pub destination_key_generated: bool,
}

impl TablePair {
    /// Resolve a pair for one table name present in both models.
    pub fn resolve(
        name: &str,
        source: &SchemaModel,
        destination: &SchemaModel,
    ) -> Result<TablePair> {
        let source_table = source.table(name).ok_or_else(|| {
            Error::ConfigError(format!("Table '{}' not found in source model", name))
        })?;
        let destination_table = destination.table(name).ok_or_else(|| {
            Error::ConfigError(format!("Table '{}' not found in destination model", name))
        })?;

        let key_column = match source_table.primary_key.as_slice() {
            [] => {
                return Err(Error::ConfigError(format!(
                    "Table '{}' has no primary key; cannot synchronize",
                    name
                )))
            }
            [single] => single.clone(),
            composite => {
                return Err(Error::ConfigError(format!(
                    "Table '{}' has a composite primary key ({}); composite keys are not supported",
                    name,
                    composite.join(", ")
                )))
            }
        };

        let destination_key_generated = destination_table
            .column(&key_column)
            .map(|c| c.is_store_generated)
            .unwrap_or(false);

        Ok(TablePair {
            table_name: name.to_string(),
            field_map: FieldMap::build(source_table, destination_table),
            source_table: source_table.clone(),
            destination_table: destination_table.clone(),
            key_column,
            destination_key_generated,
        })
    }
}

/// Registry of resolvable table pairs between two schema models
pub struct PairRegistry;

impl PairRegistry {
    /// Names of tables present in both models, in source order. Pairs are
    /// resolved lazily so one unpairable table does not fail the whole run.
    pub fn shared_table_names(source: &SchemaModel, destination: &SchemaModel) -> Vec<String> {
        source
            .named_tables()
            .filter(|t| destination.table(&t.name).is_some())
            .map(|t| t.name.clone())
            .collect()
    }
}
