//! Common test utilities
//!
//! Each test seeds its own accounts and categories and asserts only against
//! those rows. Nothing is truncated, so the tests can run in parallel
//! against one database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB")
}

/// Seed a fresh account with the given starting balance.
pub async fn seed_account(pool: &PgPool, balance: i64) -> Uuid {
    let account_id = Uuid::new_v4();

    sqlx::query("INSERT INTO accounts (id, balance) VALUES ($1, $2)")
        .bind(account_id)
        .bind(balance)
        .execute(pool)
        .await
        .expect("Failed to seed account");

    account_id
}

/// Seed a fresh garbage category.
pub async fn seed_category(pool: &PgPool, name: &str) -> Uuid {
    let category_id = Uuid::new_v4();

    sqlx::query("INSERT INTO garbage_categories (id, name) VALUES ($1, $2)")
        .bind(category_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to seed category");

    category_id
}

/// Read the stored balance for an account.
pub async fn account_balance(pool: &PgPool, account_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read balance")
}

/// Sum of live transaction amounts for an account.
pub async fn sum_of_amounts(pool: &PgPool, account_id: Uuid) -> i64 {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM transactions WHERE account_id = $1",
    )
    .bind(account_id)
    .fetch_one(pool)
    .await
    .expect("Failed to sum amounts")
}

/// Count of transaction rows for an account.
pub async fn count_rows(pool: &PgPool, account_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
