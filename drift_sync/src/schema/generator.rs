//! Corrective statement generator
//!
//! This module turns a difference report into an ordered sequence of schema
//! statements. Statements are additive only; no DROP is ever generated, so
//! destructive changes always require manual authorship.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::schema::diff::DifferenceReport;
use crate::schema::types::SchemaModel;

/// Generates corrective schema statements from a difference report
pub struct ScriptGenerator;

impl ScriptGenerator {
    /// Generate statements in dependency order: table creation first, then
    /// column additions (with default constraints), then primary keys, then
    /// NOT NULL tightening. One logical statement per element; advisory
    /// lines start with `--` and must never be executed.
    pub fn generate(source: &SchemaModel, report: &DifferenceReport) -> Result<Vec<String>> {
        let mut statements = Vec::new();

        for table_name in &report.tables_only_in_source {
            if let Some(table) = source.table(table_name) {
                statements.push(Self::create_table(table_name, source)?);
            }
        }

        for (table_name, columns) in &report.columns_only_in_source {
            let Some(table) = source.table(table_name) else {
                continue;
            };
            for column_name in columns {
                let Some(column) = table.column(column_name) else {
                    continue;
                };
                statements.push(format!(
                    "ALTER TABLE {} ADD {} {};",
                    table_name, column_name, column.physical_type
                ));
                if let Some(default) = column.effective_default() {
                    statements.push(Self::add_default_constraint(
                        table_name,
                        column_name,
                        default,
                    ));
                }
            }
        }

        for (table_name, key_column) in &report.missing_primary_keys {
            statements.push(format!(
                "ALTER TABLE {} ADD CONSTRAINT PK_{} PRIMARY KEY ({});",
                table_name, table_name, key_column
            ));
        }

        for (table_name, columns) in &report.fields_not_null_in_destination {
            let Some(table) = source.table(table_name) else {
                continue;
            };
            for column_name in columns {
                let Some(column) = table.column(column_name) else {
                    continue;
                };
                statements.push(format!(
                    "ALTER TABLE {} ALTER COLUMN {} {} NOT NULL;",
                    table_name, column_name, column.physical_type
                ));
                if column.effective_default().is_none() {
                    statements.push(format!(
                        "-- WARNING: {}.{} is set to NOT NULL. Ensure no existing records have NULL values for this column before running the script.",
                        table_name, column_name
                    ));
                }
            }
        }

        Ok(statements)
    }

    fn create_table(table_name: &str, source: &SchemaModel) -> Result<String> {
        let table = source.table(table_name).ok_or_else(|| {
            Error::GenerationError(format!("Table '{}' not found in source model", table_name))
        })?;

        if table.columns.is_empty() {
            return Err(Error::GenerationError(format!(
                "Table '{}' has no columns; refusing to generate an empty CREATE TABLE",
                table_name
            )));
        }

        let columns = table
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.physical_type))
            .collect::<Vec<_>>()
            .join(", ");

        let mut statement = format!("CREATE TABLE {} ({}", table_name, columns);
        if !table.primary_key.is_empty() {
            statement.push_str(&format!(", PRIMARY KEY ({})", table.primary_key.join(", ")));
        }
        statement.push_str(");");

        Ok(statement)
    }

    fn add_default_constraint(table_name: &str, column_name: &str, default: &str) -> String {
        format!(
            "ALTER TABLE {} ADD CONSTRAINT DF_{}_{} DEFAULT {} FOR {};",
            table_name, table_name, column_name, default, column_name
        )
    }
}

/// Record destination tables that lack a primary key the source declares.
///
/// Kept out of [`compare`](crate::schema::diff::compare) on purpose: the
/// report field exists for the generator's benefit, not as general diff
/// output. Only the first source primary key column is recorded.
/// Record the declared defaults of source-only columns, keyed by table then
/// column. Like [`collect_missing_primary_keys`], this fills a report field
/// that exists for the generator's benefit; the SQL-expression default wins
/// over a literal one.
pub fn collect_missing_default_values(source: &SchemaModel, report: &mut DifferenceReport) {
    let mut found: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    for (table_name, columns) in &report.columns_only_in_source {
        let Some(table) = source.table(table_name) else {
            continue;
        };
        for column_name in columns {
            let Some(column) = table.column(column_name) else {
                continue;
            };
            if let Some(default) = column.effective_default() {
                found
                    .entry(table_name.clone())
                    .or_default()
                    .insert(column_name.clone(), default.to_string());
            }
        }
    }
    report.missing_default_values = found;
}

pub fn collect_missing_primary_keys(
    source: &SchemaModel,
    destination: &SchemaModel,
    report: &mut DifferenceReport,
) {
    for source_table in source.named_tables() {
        let Some(first_key) = source_table.primary_key.first() else {
            continue;
        };
        if let Some(destination_table) = destination.table(&source_table.name) {
            if destination_table.primary_key.is_empty() {
                report
                    .missing_primary_keys
                    .insert(source_table.name.clone(), first_key.clone());
            }
        }
    }
}
