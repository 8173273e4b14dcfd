//! Database module
//!
//! Connection handling and corrective-script application.

pub mod connection;
pub mod executor;

// Re-export key types
pub use connection::DatabaseConnection;
pub use executor::ScriptExecutor;
