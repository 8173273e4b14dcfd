//! Live schema introspection
//!
//! Builds a schema model snapshot from a running database so drift can be
//! detected against the real store rather than a hand-maintained model.
//! PostgreSQL only; other stores supply their own snapshots.

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};

use crate::db::connection::DatabaseConnection;
use crate::error::{Error, Result};
use crate::schema::types::{Column, LogicalType, SchemaModel, Table};

/// Schema introspector trait
#[async_trait]
pub trait Introspector {
    /// Build a schema model snapshot for the given schema namespace
    async fn introspect(&self, schema_name: Option<&str>) -> Result<SchemaModel>;
}

/// Schema introspector dispatching on the connection's store type
pub struct SchemaIntrospector {
    connection: DatabaseConnection,
}

impl SchemaIntrospector {
    /// Create a new schema introspector
    pub fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Build a snapshot of the connected database's schema
    pub async fn snapshot(&self, schema_name: Option<&str>) -> Result<SchemaModel> {
        match &self.connection {
            DatabaseConnection::Postgres(pool) => {
                PostgresIntrospector { pool }.introspect(schema_name).await
            }
            _ => Err(Error::IntrospectionError(
                "Schema introspection is only implemented for PostgreSQL".to_string(),
            )),
        }
    }
}

#[derive(FromRow)]
struct TableRow {
    table_name: String,
}

#[derive(FromRow)]
struct ColumnRow {
    column_name: String,
    data_type: String,
    is_nullable: String,
    column_default: Option<String>,
    character_maximum_length: Option<i32>,
    is_identity: String,
}

#[derive(FromRow)]
struct PrimaryKeyRow {
    column_name: String,
}

/// PostgreSQL schema introspector
struct PostgresIntrospector<'a> {
    pool: &'a Pool<Postgres>,
}

#[async_trait]
impl<'a> Introspector for PostgresIntrospector<'a> {
    async fn introspect(&self, schema_name: Option<&str>) -> Result<SchemaModel> {
        let schema = schema_name.unwrap_or("public");
        let mut model = SchemaModel::new();

        let sql = r#"
            SELECT table_name
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let table_rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(schema)
            .fetch_all(self.pool)
            .await?;

        for row in table_rows {
            let table_name = row.table_name;
            let mut table = Table::new(&table_name);

            let sql = r#"
                SELECT
                    column_name,
                    data_type,
                    is_nullable,
                    column_default,
                    character_maximum_length,
                    is_identity
                FROM information_schema.columns
                WHERE table_schema = $1 AND table_name = $2
                ORDER BY ordinal_position
            "#;

            let column_rows = sqlx::query_as::<_, ColumnRow>(sql)
                .bind(schema)
                .bind(&table_name)
                .fetch_all(self.pool)
                .await?;

            let sql = r#"
                SELECT kcu.column_name
                FROM information_schema.table_constraints tc
                JOIN information_schema.key_column_usage kcu
                    ON tc.constraint_name = kcu.constraint_name
                    AND tc.table_schema = kcu.table_schema
                WHERE tc.constraint_type = 'PRIMARY KEY'
                    AND tc.table_schema = $1
                    AND tc.table_name = $2
                ORDER BY kcu.ordinal_position
            "#;

            let pk_rows = sqlx::query_as::<_, PrimaryKeyRow>(sql)
                .bind(schema)
                .bind(&table_name)
                .fetch_all(self.pool)
                .await?;

            let pk_columns: Vec<String> = pk_rows.into_iter().map(|r| r.column_name).collect();

            for col in column_rows {
                let physical_type = physical_type(&col.data_type, col.character_maximum_length);
                let logical_type = logical_type(&col.data_type)?;

                // Serial columns carry a nextval() default rather than an
                // identity marker
                let store_generated = col.is_identity == "YES"
                    || col
                        .column_default
                        .as_deref()
                        .map(|d| d.starts_with("nextval("))
                        .unwrap_or(false);

                let mut column = Column::new(&col.column_name, logical_type, &physical_type);
                column.nullable = col.is_nullable == "YES";
                column.default_sql = col.column_default;
                column.is_primary_key = pk_columns.contains(&col.column_name);
                column.is_store_generated = store_generated;

                table.add_column(column);
            }

            table.set_primary_key(pk_columns);
            model.add_table(table);
        }

        Ok(model)
    }
}

pub(crate) fn physical_type(data_type: &str, max_length: Option<i32>) -> String {
    match (data_type, max_length) {
        ("character varying", Some(len)) => format!("varchar({})", len),
        ("character", Some(len)) => format!("char({})", len),
        _ => data_type.to_string(),
    }
}

pub(crate) fn logical_type(data_type: &str) -> Result<LogicalType> {
    let logical = match data_type {
        "boolean" => LogicalType::Bool,
        "smallint" => LogicalType::Int16,
        "integer" => LogicalType::Int32,
        "bigint" => LogicalType::Int64,
        "real" | "double precision" => LogicalType::Float64,
        "numeric" | "decimal" | "money" => LogicalType::Decimal,
        "character varying" | "character" | "text" | "citext" => LogicalType::Text,
        "bytea" => LogicalType::Bytes,
        "date" | "timestamp without time zone" | "timestamp with time zone" => {
            LogicalType::Timestamp
        }
        "uuid" => LogicalType::Uuid,
        other => {
            return Err(Error::IntrospectionError(format!(
                "Unmapped column data type: {}",
                other
            )))
        }
    };
    Ok(logical)
}
