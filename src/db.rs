//! Database module
//!
//! Connection pool construction and schema checks.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Build the connection pool.
///
/// Every pooled session gets bounded lock and statement timeouts so an
/// atomic unit stuck behind a lock fails with a classifiable error instead
/// of waiting forever.
pub async fn connect_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let lock_timeout = config.lock_timeout_ms.to_string();
    let statement_timeout = config.statement_timeout_ms.to_string();
    let idle_timeout = config.idle_in_transaction_timeout_ms.to_string();

    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .after_connect(move |conn, _meta| {
            let lock_timeout = lock_timeout.clone();
            let statement_timeout = statement_timeout.clone();
            let idle_timeout = idle_timeout.clone();
            Box::pin(async move {
                sqlx::query(
                    "SELECT set_config('lock_timeout', $1, false), \
                     set_config('statement_timeout', $2, false), \
                     set_config('idle_in_transaction_session_timeout', $3, false)",
                )
                .bind(lock_timeout)
                .bind(statement_timeout)
                .bind(idle_timeout)
                .execute(&mut *conn)
                .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = vec!["accounts", "garbage_categories", "transactions"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}
