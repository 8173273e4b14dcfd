//! Records and per-pair field mapping
//!
//! Source and destination record collections are independently typed and
//! only structurally similar. Rather than matching fields by name for every
//! record, the mapping is resolved once per table pair into a field-mapping
//! table and reused for every record that pair processes.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::schema::types::Table;
use crate::sync::value::Value;

/// A single record: field values keyed by column name, in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// A fresh record for the given table, every field null
    pub fn empty_for(table: &Table) -> Self {
        let mut fields = IndexMap::new();
        for column in &table.columns {
            fields.insert(column.name.clone(), Value::Null);
        }
        Self { fields }
    }

    /// Set a field value, returning self for chaining
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Field-mapping table for one table pair: the column names present on both
/// sides with the same name and the same logical type. Built once per pair.
#[derive(Debug, Clone)]
pub struct FieldMap {
    mapped: Vec<String>,
}

impl FieldMap {
    /// Build the mapping from a pair of table snapshots. Columns without a
    /// same-named, same-typed counterpart on the source are left out, so
    /// destination-only computed or audit columns are never touched.
    pub fn build(source: &Table, destination: &Table) -> Self {
        let mapped = destination
            .columns
            .iter()
            .filter(|dest_col| {
                source
                    .column(&dest_col.name)
                    .map(|src_col| src_col.logical_type == dest_col.logical_type)
                    .unwrap_or(false)
            })
            .map(|c| c.name.clone())
            .collect();

        Self { mapped }
    }

    /// Column names the map covers, in destination column order
    pub fn columns(&self) -> &[String] {
        &self.mapped
    }

    /// Compare two records over the mapped fields only. A field missing from
    /// either record counts as null.
    pub fn records_equal(&self, source: &Record, destination: &Record) -> bool {
        self.mapped.iter().all(|name| {
            let source_value = source.get(name).unwrap_or(&Value::Null);
            let destination_value = destination.get(name).unwrap_or(&Value::Null);
            source_value == destination_value
        })
    }

    /// Copy mapped field values from source onto destination. Fields outside
    /// the map keep whatever value the destination record already carries.
    pub fn copy(&self, source: &Record, destination: &mut Record) -> Result<()> {
        for name in &self.mapped {
            let value = source.get(name).ok_or_else(|| {
                Error::MissingRecord(format!(
                    "source record has no field '{}' required by the field map",
                    name
                ))
            })?;
            destination.fields.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}
