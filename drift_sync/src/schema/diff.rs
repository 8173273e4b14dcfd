//! Schema difference calculator
//!
//! This module compares two schema model snapshots and records the
//! structural drift between them

use indexmap::IndexMap;

use crate::schema::types::{LogicalType, SchemaModel};

/// Represents the structural differences between two schema models
#[derive(Debug, Clone, Default)]
pub struct DifferenceReport {
    pub tables_only_in_source: Vec<String>,
    pub tables_only_in_destination: Vec<String>,
    pub missing_table_descriptions: IndexMap<String, String>,
    pub columns_only_in_source: IndexMap<String, Vec<String>>,
    pub columns_only_in_destination: IndexMap<String, Vec<String>>,
    pub column_type_differences: IndexMap<String, IndexMap<String, TypeDifference>>,
    /// Destination tables lacking a primary key the source declares.
    /// Not populated by [`compare`]; filled by
    /// [`collect_missing_primary_keys`](crate::schema::generator::collect_missing_primary_keys)
    /// for the script generator's benefit.
    pub missing_primary_keys: IndexMap<String, String>,
    /// Declared defaults of source-only columns; filled by
    /// [`collect_missing_default_values`](crate::schema::generator::collect_missing_default_values),
    /// not by [`compare`]
    pub missing_default_values: IndexMap<String, IndexMap<String, String>>,
    /// Columns required in source but nullable in destination
    pub fields_not_null_in_destination: IndexMap<String, Vec<String>>,
}

/// A column whose logical type differs between source and destination
#[derive(Debug, Clone)]
pub struct TypeDifference {
    pub source_type: LogicalType,
    pub destination_type: LogicalType,
    pub description: String,
}

impl DifferenceReport {
    /// Check if the report is empty (no drift detected)
    pub fn is_empty(&self) -> bool {
        self.tables_only_in_source.is_empty()
            && self.tables_only_in_destination.is_empty()
            && self.columns_only_in_source.is_empty()
            && self.columns_only_in_destination.is_empty()
            && self.column_type_differences.is_empty()
            && self.missing_primary_keys.is_empty()
            && self.missing_default_values.is_empty()
            && self.fields_not_null_in_destination.is_empty()
    }
}

/// Compare two schema models and build a difference report.
///
/// Two symmetric passes. The first walks source tables and classifies each
/// source column into exactly one of: missing from destination, type
/// mismatch, or required-in-source-but-nullable-in-destination (first match
/// wins). The second pass only records tables and columns the destination
/// has and the source does not; type and nullability are not re-checked, so
/// nothing is reported twice.
///
/// Tables with an empty physical name are excluded from comparison entirely.
pub fn compare(source: &SchemaModel, destination: &SchemaModel) -> DifferenceReport {
    let mut report = DifferenceReport::default();

    // Pass 1: source -> destination
    for source_table in source.named_tables() {
        let Some(destination_table) = destination
            .named_tables()
            .find(|t| t.name == source_table.name)
        else {
            report.tables_only_in_source.push(source_table.name.clone());
            report.missing_table_descriptions.insert(
                source_table.name.clone(),
                format!(
                    "Table '{}' exists in source but not in destination.",
                    source_table.name
                ),
            );
            continue;
        };

        for source_column in &source_table.columns {
            match destination_table.column(&source_column.name) {
                None => {
                    report
                        .columns_only_in_source
                        .entry(source_table.name.clone())
                        .or_default()
                        .push(source_column.name.clone());
                }
                Some(destination_column)
                    if source_column.logical_type != destination_column.logical_type =>
                {
                    report
                        .column_type_differences
                        .entry(source_table.name.clone())
                        .or_default()
                        .insert(
                            source_column.name.clone(),
                            TypeDifference {
                                source_type: source_column.logical_type,
                                destination_type: destination_column.logical_type,
                                description: format!(
                                    "Column '{}' in table '{}' has type '{}' in source but '{}' in destination.",
                                    source_column.name,
                                    source_table.name,
                                    source_column.logical_type,
                                    destination_column.logical_type
                                ),
                            },
                        );
                }
                Some(destination_column) => {
                    if !source_column.nullable && destination_column.nullable {
                        report
                            .fields_not_null_in_destination
                            .entry(source_table.name.clone())
                            .or_default()
                            .push(source_column.name.clone());
                    }
                }
            }
        }
    }

    // Pass 2: destination -> source
    for destination_table in destination.named_tables() {
        let Some(source_table) = source
            .named_tables()
            .find(|t| t.name == destination_table.name)
        else {
            report
                .tables_only_in_destination
                .push(destination_table.name.clone());
            report.missing_table_descriptions.insert(
                destination_table.name.clone(),
                format!(
                    "Table '{}' exists in destination but not in source.",
                    destination_table.name
                ),
            );
            continue;
        };

        for destination_column in &destination_table.columns {
            if source_table.column(&destination_column.name).is_none() {
                report
                    .columns_only_in_destination
                    .entry(destination_table.name.clone())
                    .or_default()
                    .push(destination_column.name.clone());
            }
        }
    }

    report
}
