//! Error types for drift_sync

use thiserror::Error;

/// Result type for drift_sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for drift_sync
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schema introspection error: {0}")]
    IntrospectionError(String),

    #[error("Script generation error: {0}")]
    GenerationError(String),

    #[error("Unsupported primary key type: {0}")]
    UnsupportedKeyType(String),

    #[error("Missing record: {0}")]
    MissingRecord(String),

    #[error("Write failure: {0}")]
    WriteError(String),

    #[error("Progress tracker error: {0}")]
    TrackerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Convert Serde JSON errors (tracker state file) to drift_sync errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to drift_sync errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
