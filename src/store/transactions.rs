//! Transaction Store
//!
//! Pure persistence for transaction rows. It knows nothing about balances;
//! the ledger composes these operations with the account store inside one
//! database transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::error::is_foreign_key_violation;
use crate::domain::{Amount, Category, LedgerError, Transaction, TransactionDetail};

/// Full row shape of the transactions table
type TransactionRow = (
    Uuid,
    Uuid,
    Option<Uuid>,
    i64,
    Option<Decimal>,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// Row shape of the rendering query: transaction columns joined with the
/// resolved category, FK columns dropped
type DetailRow = (
    Uuid,
    i64,
    Option<Decimal>,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
    Option<Uuid>,
    Option<String>,
);

/// Store for transaction rows
#[derive(Debug, Clone)]
pub struct TransactionStore {
    pool: PgPool,
}

impl TransactionStore {
    /// Create a new TransactionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Writes (always inside a caller-owned atomic unit)
    // =========================================================================

    /// Insert a new transaction row.
    ///
    /// A foreign key violation means the account vanished between request
    /// and write; it is reported as `AccountNotFound` so the whole unit
    /// rolls back with a meaningful kind.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
        account_id: Uuid,
        category_id: Option<Uuid>,
        amount: &Amount,
        weight: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, account_id, category_id, amount, weight, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(category_id)
        .bind(amount.value())
        .bind(weight)
        .bind(note)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                LedgerError::AccountNotFound(account_id)
            } else {
                e.into()
            }
        })?;

        Ok(())
    }

    /// Lock a transaction row and return its owning account and current
    /// amount. Racing mutations of the same transaction queue up here.
    pub async fn fetch_for_update(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<(Uuid, i64)>, LedgerError> {
        let row: Option<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT account_id, amount FROM transactions WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Apply a partial update. Absent fields keep their stored values; the
    /// COALESCE runs server-side so the patch is a single write.
    pub async fn apply_patch(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
        category_id: Option<Uuid>,
        note: Option<&str>,
        weight: Option<Decimal>,
        amount: Option<&Amount>,
    ) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET
                category_id = COALESCE($2, category_id),
                note = COALESCE($3, note),
                weight = COALESCE($4, weight),
                amount = COALESCE($5, amount),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(category_id)
        .bind(note)
        .bind(weight)
        .bind(amount.map(Amount::value))
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Delete a transaction row, returning its owning account and amount so
    /// the ledger can reverse the contribution. `None` if the row is gone.
    pub async fn remove(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<(Uuid, i64)>, LedgerError> {
        let row: Option<(Uuid, i64)> = sqlx::query_as(
            r#"
            DELETE FROM transactions WHERE id = $1 RETURNING account_id, amount
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row)
    }

    // =========================================================================
    // Reads (outside atomic units)
    // =========================================================================

    /// Fetch a transaction row as stored.
    pub async fn fetch(&self, id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, account_id, category_id, amount, weight, note, created_at, updated_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(id, account_id, category_id, amount, weight, note, created_at, updated_at)| {
                Transaction {
                    id,
                    account_id,
                    category_id,
                    amount,
                    weight,
                    note,
                    created_at,
                    updated_at,
                }
            },
        ))
    }

    /// Fetch a transaction with its category resolved for rendering.
    pub async fn fetch_detail(&self, id: Uuid) -> Result<Option<TransactionDetail>, LedgerError> {
        let row: Option<DetailRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.amount, t.weight, t.note, t.created_at, t.updated_at,
                   c.id, c.name
            FROM transactions t
            LEFT JOIN garbage_categories c ON c.id = t.category_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(detail_from_row))
    }

    /// Fetch one page of an account's transactions, newest first.
    pub async fn list_page(
        &self,
        account_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransactionDetail>, LedgerError> {
        let rows: Vec<DetailRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.amount, t.weight, t.note, t.created_at, t.updated_at,
                   c.id, c.name
            FROM transactions t
            LEFT JOIN garbage_categories c ON c.id = t.category_id
            WHERE t.account_id = $1
            ORDER BY t.created_at DESC, t.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(detail_from_row).collect())
    }

    /// Count all transactions recorded for an account.
    pub async fn count_for_account(&self, account_id: Uuid) -> Result<i64, LedgerError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

fn detail_from_row(row: DetailRow) -> TransactionDetail {
    let (id, amount, weight, note, created_at, updated_at, category_id, category_name) = row;

    // Both columns come from the same joined row; a dangling category_id
    // yields no category, matching the loose reference semantics.
    let category = match (category_id, category_name) {
        (Some(id), Some(name)) => Some(Category { id, name }),
        _ => None,
    };

    TransactionDetail {
        id,
        amount,
        weight,
        note,
        category,
        created_at,
        updated_at,
    }
}
