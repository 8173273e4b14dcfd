//! Field and key value types
//!
//! Record fields are held as a tagged union so that two independently-typed
//! record collections can be compared field by field at run time.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::schema::types::LogicalType;

/// A single field value.
///
/// Equality follows the reconciliation rules: byte sequences compare by
/// exact content, everything else by value, and a null field is equal only
/// to a null field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    /// Decimals are carried as their canonical string form
    Decimal(String),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    /// The logical type this value inhabits, if not null
    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(LogicalType::Bool),
            Value::Int16(_) => Some(LogicalType::Int16),
            Value::Int32(_) => Some(LogicalType::Int32),
            Value::Int64(_) => Some(LogicalType::Int64),
            Value::Float64(_) => Some(LogicalType::Float64),
            Value::Decimal(_) => Some(LogicalType::Decimal),
            Value::Text(_) => Some(LogicalType::Text),
            Value::Bytes(_) => Some(LogicalType::Bytes),
            Value::Timestamp(_) => Some(LogicalType::Timestamp),
            Value::Uuid(_) => Some(LogicalType::Uuid),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A primary key value. Only string and integer keys are supported; any
/// other variant aborts the table pair with an explicit error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
    Int(i64),
    Text(String),
}

impl KeyValue {
    /// Render the key for embedding into a lookup predicate. Text keys are
    /// quoted with single quotes doubled.
    pub fn to_sql_literal(&self) -> String {
        match self {
            KeyValue::Int(i) => i.to_string(),
            KeyValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Int(i) => write!(f, "{}", i),
            KeyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Reject key batches mixing string and integer keys; a lookup predicate
/// can only embed one kind.
pub fn ensure_homogeneous(keys: &[KeyValue]) -> Result<()> {
    let mixed = keys.windows(2).any(|pair| {
        std::mem::discriminant(&pair[0]) != std::mem::discriminant(&pair[1])
    });
    if mixed {
        return Err(Error::UnsupportedKeyType(
            "mixed string and integer primary key values in one batch".to_string(),
        ));
    }
    Ok(())
}

impl TryFrom<&Value> for KeyValue {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Int16(i) => Ok(KeyValue::Int(i64::from(*i))),
            Value::Int32(i) => Ok(KeyValue::Int(i64::from(*i))),
            Value::Int64(i) => Ok(KeyValue::Int(*i)),
            Value::Text(s) => Ok(KeyValue::Text(s.clone())),
            other => Err(Error::UnsupportedKeyType(format!(
                "primary key values must be string or integer, got {:?}",
                other
            ))),
        }
    }
}
