//! Script executor
//!
//! Applies a generated corrective script against a database connection.
//! Comment lines (`--`) are informational only and are never executed.

use crate::db::connection::DatabaseConnection;
use crate::error::Result;

/// Executor for generated schema-correction scripts
pub struct ScriptExecutor {
    connection: DatabaseConnection,
}

impl ScriptExecutor {
    /// Create a new script executor
    pub fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Execute a single SQL statement
    pub async fn execute(&self, sql: &str) -> Result<()> {
        self.connection.execute(sql).await
    }

    /// Apply a generated script in order, skipping advisory comment lines
    pub async fn apply_script(&self, statements: &[String]) -> Result<()> {
        for statement in statements {
            if statement.trim_start().starts_with("--") {
                tracing::warn!(advisory = statement.as_str(), "Skipping advisory line");
                continue;
            }
            self.execute(statement).await?;
        }

        Ok(())
    }

    /// Apply a generated script inside a transaction
    pub async fn apply_script_in_transaction(&self, statements: &[String]) -> Result<()> {
        self.execute("BEGIN;").await?;

        match self.apply_script(statements).await {
            Ok(_) => self.execute("COMMIT;").await,
            Err(e) => {
                let _ = self.execute("ROLLBACK;").await;
                Err(e)
            }
        }
    }

    /// Get database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}
