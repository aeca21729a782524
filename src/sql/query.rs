//! Prepared-statement execution: single update, sequential multi-insert,
//! and batch insert inside one transaction.

use crate::error::ClientError;
use crate::sql::params::PgBindValue;
use serde_json::Value;
use sqlx::{Connection, PgConnection};

/// Execute one statement with pre-built bind values. Returns the
/// affected-row count. Use this when a value has no JSON representation
/// (e.g. [`PgBindValue::Bytes`] for RAW binary columns).
pub async fn execute_binds(
    conn: &mut PgConnection,
    sql: &str,
    args: Vec<PgBindValue>,
) -> Result<u64, ClientError> {
    let mut query = sqlx::query(sql);
    for arg in args {
        query = query.bind(arg);
    }
    let result = query.execute(&mut *conn).await.map_err(|e| {
        tracing::error!(sql = %sql, error = %e, "statement failed");
        ClientError::from(e)
    })?;
    Ok(result.rows_affected())
}

/// Execute one parameterized statement. Returns the affected-row count.
pub async fn execute_update(
    conn: &mut PgConnection,
    sql: &str,
    args: &[Value],
) -> Result<u64, ClientError> {
    let binds = args.iter().map(PgBindValue::from_json).collect();
    execute_binds(conn, sql, binds).await
}

/// Run `sql` once per row, sequentially. Returns the summed affected rows.
pub async fn multi_insert(
    conn: &mut PgConnection,
    sql: &str,
    rows: &[Vec<Value>],
) -> Result<u64, ClientError> {
    let mut affected = 0;
    for row in rows {
        affected += execute_update(conn, sql, row).await?;
    }
    Ok(affected)
}

/// Run the whole row set inside a single transaction, one statement per row.
/// Fallback for drivers whose batched execution mishandles certain value
/// encodings: same observable effect as a batch, committed atomically.
pub async fn batch_insert(
    conn: &mut PgConnection,
    sql: &str,
    rows: &[Vec<Value>],
) -> Result<u64, ClientError> {
    let mut tx = conn.begin().await?;
    let mut affected = 0;
    for row in rows {
        affected += execute_update(&mut tx, sql, row).await?;
    }
    tx.commit().await?;
    Ok(affected)
}
