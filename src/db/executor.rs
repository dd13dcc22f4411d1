//! SQL execution against the SQLite store.
//!
//! The executor runs model-produced statements exactly as received. The
//! statement is prepared first so column metadata is available even when the
//! result set is empty, then fetched in full.

use crate::db::types::{ColumnInfo, QueryResult, Row, Value};
use crate::error::{IntelliError, Result};
use crate::safety;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column as SqlxColumn, Executor as SqlxExecutor, Row as SqlxRow, Statement, TypeInfo, ValueRef};
use std::time::{Duration, Instant};
use tracing::debug;

/// Statement timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 30;

/// Controls which statement types the executor accepts.
///
/// The default profile executes whatever the translator produced, mutating
/// statements included. `ReadOnly` adds a classification stage that rejects
/// anything but read-only statements before they reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Execute any statement type.
    #[default]
    Unrestricted,

    /// Reject statements that could modify the store.
    ReadOnly,
}

/// Executes SQL statements against the store and shapes the results.
pub struct QueryExecutor {
    pool: SqlitePool,
    policy: AccessPolicy,
}

impl QueryExecutor {
    /// Creates an executor over the given pool with the default policy.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            policy: AccessPolicy::Unrestricted,
        }
    }

    /// Sets the access policy.
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active access policy.
    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Executes the statement and returns the full result set.
    ///
    /// Columns come from the prepared statement's metadata, so row-returning
    /// statements report their projection even when no rows match. Statements
    /// that produce no result description yield empty columns.
    pub async fn execute(&self, sql: &str) -> Result<QueryResult> {
        if self.policy == AccessPolicy::ReadOnly {
            safety::ensure_read_only(sql)?;
        }

        debug!("Executing statement ({} bytes)", sql.len());
        let start = Instant::now();

        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            self.prepare_and_fetch(sql),
        )
        .await
        .map_err(|_| {
            IntelliError::execution(format!(
                "Statement timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })??;

        let execution_time = start.elapsed();
        let (columns, raw_rows) = result;
        let rows: Vec<Row> = raw_rows.iter().map(convert_row).collect();

        debug!(
            "Statement returned {} rows in {:?}",
            rows.len(),
            execution_time
        );

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn prepare_and_fetch(&self, sql: &str) -> Result<(Vec<ColumnInfo>, Vec<SqliteRow>)> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| IntelliError::execution(format!("Store unavailable: {e}")))?;

        let statement = (&mut *conn)
            .prepare(sql)
            .await
            .map_err(|e| IntelliError::execution(format_store_error(e)))?;

        let columns: Vec<ColumnInfo> = statement
            .columns()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
            .collect();

        let rows = statement
            .query()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| IntelliError::execution(format_store_error(e)))?;

        Ok((columns, rows))
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single column value to our Value type.
///
/// SQLite columns carry declared type affinities, but the stored value's
/// runtime storage class is what decodes reliably, so the match is on the
/// value's own type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let Ok(raw) = row.try_get_raw(index) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }

    match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(Value::Blob)
            .unwrap_or(Value::Null),

        // TEXT and anything else decodes as a string
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

/// Surfaces the store's own diagnostic message unmodified where possible.
fn format_store_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::bootstrap::{ensure_schema, seed_if_empty};
    use crate::db::schema::SchemaDescriptor;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool, &SchemaDescriptor::customers())
            .await
            .unwrap();
        seed_if_empty(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_select_all_customers() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let result = executor.execute("SELECT * FROM customers").await.unwrap();

        assert_eq!(result.row_count, 3);
        assert_eq!(
            result.column_names(),
            vec!["id", "name", "city", "purchase_amount"]
        );
        assert_eq!(
            result.rows[0],
            vec![
                Value::Int(1),
                Value::Text("Neerja".to_string()),
                Value::Text("Kadapa".to_string()),
                Value::Int(2500),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_result_still_reports_columns() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let result = executor
            .execute("SELECT name, city FROM customers WHERE city = 'Nowhere'")
            .await
            .unwrap();

        assert_eq!(result.row_count, 0);
        assert_eq!(result.column_names(), vec!["name", "city"]);
    }

    #[tokio::test]
    async fn test_malformed_sql_is_an_execution_error() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let err = executor
            .execute("SELEKT * FROM customers")
            .await
            .unwrap_err();

        assert_eq!(err.category(), "Execution Error");
        assert!(err.to_string().contains("syntax error"));
    }

    #[tokio::test]
    async fn test_unknown_table_surfaces_store_diagnostic() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let err = executor.execute("SELECT * FROM orders").await.unwrap_err();

        assert!(err.to_string().contains("no such table"));
    }

    #[tokio::test]
    async fn test_aggregate_value_classes() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let result = executor
            .execute("SELECT COUNT(*), AVG(purchase_amount) FROM customers")
            .await
            .unwrap();

        assert_eq!(result.rows[0][0], Value::Int(3));
        assert!(matches!(result.rows[0][1], Value::Float(_)));
    }

    #[tokio::test]
    async fn test_null_values_decode_as_null() {
        let executor = QueryExecutor::new(seeded_pool().await);

        let result = executor.execute("SELECT NULL").await.unwrap();

        assert_eq!(result.rows[0][0], Value::Null);
    }

    #[tokio::test]
    async fn test_mutating_statement_executes_by_default() {
        let pool = seeded_pool().await;
        let executor = QueryExecutor::new(pool.clone());

        let result = executor
            .execute("INSERT INTO customers (name, city, purchase_amount) VALUES ('Asha', 'Pune', 1200)")
            .await
            .unwrap();

        assert_eq!(result.row_count, 0);
        assert!(result.columns.is_empty());

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn test_read_only_policy_rejects_mutations() {
        let executor =
            QueryExecutor::new(seeded_pool().await).with_policy(AccessPolicy::ReadOnly);

        let err = executor
            .execute("DELETE FROM customers")
            .await
            .unwrap_err();

        assert_eq!(err.category(), "Execution Error");
        assert!(err.to_string().contains("read-only"));
    }

    #[tokio::test]
    async fn test_read_only_policy_allows_selects() {
        let executor =
            QueryExecutor::new(seeded_pool().await).with_policy(AccessPolicy::ReadOnly);

        let result = executor
            .execute("SELECT name FROM customers WHERE city = 'Kadapa'")
            .await
            .unwrap();

        assert_eq!(result.row_count, 1);
        assert_eq!(result.rows[0][0], Value::Text("Neerja".to_string()));
    }
}
