//! Type definitions for schema model snapshots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical (store-independent) data type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Bool,
    Int16,
    Int32,
    Int64,
    Float64,
    Decimal,
    Text,
    Bytes,
    Timestamp,
    Uuid,
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalType::Bool => "bool",
            LogicalType::Int16 => "int16",
            LogicalType::Int32 => "int32",
            LogicalType::Int64 => "int64",
            LogicalType::Float64 => "float64",
            LogicalType::Decimal => "decimal",
            LogicalType::Text => "string",
            LogicalType::Bytes => "bytes",
            LogicalType::Timestamp => "timestamp",
            LogicalType::Uuid => "uuid",
        };
        write!(f, "{}", name)
    }
}

/// Represents a read-only structural description of a store's tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    pub tables: Vec<Table>,
}

impl SchemaModel {
    /// Create a new empty schema model
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Add a table to the model
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Look up a table by physical name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Tables that carry a physical name; nameless entries are never diffed
    pub fn named_tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().filter(|t| !t.name.is_empty())
    }
}

/// Represents a database table snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    /// Primary key column names, in key order; empty if the table has none
    pub primary_key: Vec<String>,
}

impl Table {
    /// Create a new table with the given physical name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Set the primary key column names
    pub fn set_primary_key(&mut self, columns: Vec<String>) {
        self.primary_key = columns;
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Represents a database column snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Logical data type used for comparison and field mapping
    pub logical_type: LogicalType,
    /// Store-native type text, e.g. "nvarchar(50)"
    pub physical_type: String,
    pub nullable: bool,
    /// Default value as a SQL expression; takes precedence over `default_value`
    pub default_sql: Option<String>,
    /// Default value as a plain literal
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    /// Whether the store generates this column's value on insert
    pub is_store_generated: bool,
}

impl Column {
    /// Create a new column with the given name and types
    pub fn new(name: &str, logical_type: LogicalType, physical_type: &str) -> Self {
        Self {
            name: name.to_string(),
            logical_type,
            physical_type: physical_type.to_string(),
            nullable: false,
            default_sql: None,
            default_value: None,
            is_primary_key: false,
            is_store_generated: false,
        }
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set a plain-literal default value
    pub fn default_value(mut self, default: &str) -> Self {
        self.default_value = Some(default.to_string());
        self
    }

    /// Set a SQL-expression default value
    pub fn default_sql(mut self, default: &str) -> Self {
        self.default_sql = Some(default.to_string());
        self
    }

    /// Mark the column as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column's value as store-generated
    pub fn store_generated(mut self) -> Self {
        self.is_store_generated = true;
        self
    }

    /// The default used in generated statements; SQL expression wins over a literal
    pub fn effective_default(&self) -> Option<&str> {
        self.default_sql.as_deref().or(self.default_value.as_deref())
    }
}
