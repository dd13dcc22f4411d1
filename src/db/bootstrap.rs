//! Store bootstrap for IntelliSQL.
//!
//! One-time, idempotent setup: creates the `customers` table if missing and
//! inserts the fixed seed rows only when the table is empty. Runs before the
//! pipeline accepts questions; it is not part of the request path.

use crate::db::schema::SchemaDescriptor;
use crate::error::{IntelliError, Result};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

/// Rows inserted into an empty `customers` table, in insert order.
///
/// SQLite assigns rowids 1..=3 since the table is empty at insert time.
pub const SEED_ROWS: [(&str, &str, i64); 3] = [
    ("Neerja", "Kadapa", 2500),
    ("Nikhil", "Tirupati", 5000),
    ("Rehman", "Hyderabad", 7568),
];

/// Outcome of the seeding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table was empty and the seed rows were inserted.
    Inserted,
    /// The table already held rows; nothing was inserted.
    AlreadyPopulated,
}

/// Ensures the queryable table described by `schema` exists.
pub async fn ensure_schema(pool: &SqlitePool, schema: &SchemaDescriptor) -> Result<()> {
    sqlx::query(&schema.create_table_sql())
        .execute(pool)
        .await
        .map_err(|e| {
            IntelliError::execution(format!("Failed to create {} table: {e}", schema.table))
        })?;

    Ok(())
}

/// Inserts the seed rows if and only if the `customers` table is empty.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<SeedOutcome> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await
        .map_err(|e| IntelliError::execution(format!("Failed to count customers: {e}")))?;

    if count > 0 {
        debug!("Customers table already holds {count} rows, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| IntelliError::execution(format!("Failed to start seed transaction: {e}")))?;

    for (name, city, purchase_amount) in SEED_ROWS {
        sqlx::query("INSERT INTO customers (name, city, purchase_amount) VALUES (?, ?, ?)")
            .bind(name)
            .bind(city)
            .bind(purchase_amount)
            .execute(&mut *tx)
            .await
            .map_err(|e| IntelliError::execution(format!("Failed to insert seed row: {e}")))?;
    }

    tx.commit()
        .await
        .map_err(|e| IntelliError::execution(format!("Failed to commit seed rows: {e}")))?;

    info!("Seeded customers table with {} rows", SEED_ROWS.len());
    Ok(SeedOutcome::Inserted)
}
