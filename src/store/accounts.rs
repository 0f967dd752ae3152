//! Account Store
//!
//! Durable saving-book records. Balances are only ever written through
//! `apply_delta`, which the ledger calls inside its atomic units.

use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::LedgerError;

/// Store for account rows and their cached balances
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    /// Create a new AccountStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a signed delta to the stored balance and return the new balance.
    ///
    /// The read-modify-write happens inside the UPDATE itself, so concurrent
    /// deltas on the same account serialize on the row lock and both land.
    /// A delta that would take the balance below zero leaves the row
    /// untouched and fails with `InsufficientFunds`.
    pub async fn apply_delta(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        account_id: Uuid,
        delta: i64,
    ) -> Result<i64, LedgerError> {
        let new_balance: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1 AND balance + $2 >= 0
            RETURNING balance
            "#,
        )
        .bind(account_id)
        .bind(delta)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some(balance) = new_balance {
            return Ok(balance);
        }

        // No row matched: the account is gone or the delta would overdraw
        // it. Probe within the same unit to tell the two apart.
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
                .bind(account_id)
                .fetch_optional(&mut **tx)
                .await?;

        match balance {
            Some(balance) => Err(LedgerError::InsufficientFunds { balance, delta }),
            None => Err(LedgerError::AccountNotFound(account_id)),
        }
    }

    /// Get the current balance for an account.
    ///
    /// Plain read outside any atomic unit; may trail in-flight writes.
    pub async fn balance(&self, account_id: Uuid) -> Result<i64, LedgerError> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT balance FROM accounts WHERE id = $1")
                .bind(account_id)
                .fetch_optional(&self.pool)
                .await?;

        balance.ok_or(LedgerError::AccountNotFound(account_id))
    }
}
