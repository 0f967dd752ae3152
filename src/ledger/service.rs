//! Ledger service
//!
//! Keeps account balances synchronized with transaction history. Every
//! mutating operation runs as one database transaction covering both the
//! transaction row and the owning account's balance, so the cached balance
//! never drifts from the sum of live transaction amounts.

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Amount, LedgerError, TransactionDetail};
use crate::store::{AccountStore, TransactionStore};

use super::{CreateTransactionCommand, UpdateTransactionCommand};

/// Attempts per operation before `Contention` is surfaced to the caller
const MAX_ATTEMPTS: u32 = 3;

/// Base backoff between attempts, grows linearly
const RETRY_BACKOFF_MS: u64 = 50;

/// Ledger synchronizer for transactions and account balances
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: AccountStore,
    transactions: TransactionStore,
    pool: PgPool,
}

impl Ledger {
    /// Create a new Ledger
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountStore::new(pool.clone()),
            transactions: TransactionStore::new(pool.clone()),
            pool,
        }
    }

    // =========================================================================
    // create
    // =========================================================================

    /// Record a new transaction and apply its amount to the owning account.
    ///
    /// Both writes commit together. If anything fails, the whole unit rolls
    /// back and neither the row nor the balance is changed.
    pub async fn create(
        &self,
        command: &CreateTransactionCommand,
    ) -> Result<TransactionDetail, LedgerError> {
        let amount = Amount::new(command.amount)?;

        let id = self
            .with_retry(|| self.try_create(command, &amount))
            .await?;

        // Rendering read, outside the atomic unit.
        self.transactions
            .fetch_detail(id)
            .await?
            .ok_or(LedgerError::NotFound(id))
    }

    async fn try_create(
        &self,
        command: &CreateTransactionCommand,
        amount: &Amount,
    ) -> Result<Uuid, LedgerError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        self.transactions
            .insert(
                &mut tx,
                id,
                command.account_id,
                command.category_id,
                amount,
                command.weight,
                command.note.as_deref(),
            )
            .await?;

        let balance = self
            .accounts
            .apply_delta(&mut tx, command.account_id, amount.value())
            .await?;

        tx.commit().await?;

        tracing::debug!(
            "Transaction {} created for account {} (amount {}, balance {})",
            id,
            command.account_id,
            amount,
            balance
        );

        Ok(id)
    }

    // =========================================================================
    // update
    // =========================================================================

    /// Partially update a transaction. If the amount changes, the difference
    /// between new and old amount is applied to the owning account within
    /// the same atomic unit.
    pub async fn update(
        &self,
        transaction_id: Uuid,
        command: &UpdateTransactionCommand,
    ) -> Result<TransactionDetail, LedgerError> {
        let amount = command.amount.map(Amount::new).transpose()?;

        self.with_retry(|| self.try_update(transaction_id, command, amount.as_ref()))
            .await?;

        self.transactions
            .fetch_detail(transaction_id)
            .await?
            .ok_or(LedgerError::NotFound(transaction_id))
    }

    async fn try_update(
        &self,
        transaction_id: Uuid,
        command: &UpdateTransactionCommand,
        amount: Option<&Amount>,
    ) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        // Locks the row, so racing mutations of this transaction queue up
        // and each sees the amount the previous one committed.
        let (account_id, previous_amount) = self
            .transactions
            .fetch_for_update(&mut tx, transaction_id)
            .await?
            .ok_or(LedgerError::NotFound(transaction_id))?;

        if !command.is_empty() {
            self.transactions
                .apply_patch(
                    &mut tx,
                    transaction_id,
                    command.category_id,
                    command.note.as_deref(),
                    command.weight,
                    amount,
                )
                .await?;
        }

        if let Some(amount) = amount {
            let delta = amount.value() - previous_amount;
            self.accounts.apply_delta(&mut tx, account_id, delta).await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Transaction {} updated for account {}",
            transaction_id,
            account_id
        );

        Ok(())
    }

    // =========================================================================
    // delete
    // =========================================================================

    /// Delete a transaction and reverse its contribution to the owning
    /// account's balance, both within one atomic unit.
    pub async fn delete(&self, transaction_id: Uuid) -> Result<(), LedgerError> {
        self.with_retry(|| self.try_delete(transaction_id)).await
    }

    async fn try_delete(&self, transaction_id: Uuid) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let (account_id, amount) = self
            .transactions
            .remove(&mut tx, transaction_id)
            .await?
            .ok_or(LedgerError::NotFound(transaction_id))?;

        self.accounts
            .apply_delta(&mut tx, account_id, -amount)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            "Transaction {} deleted from account {} (amount {})",
            transaction_id,
            account_id,
            amount
        );

        Ok(())
    }

    // =========================================================================
    // reads
    // =========================================================================

    /// Fetch a single transaction prepared for rendering.
    pub async fn get(&self, transaction_id: Uuid) -> Result<TransactionDetail, LedgerError> {
        self.transactions
            .fetch_detail(transaction_id)
            .await?
            .ok_or(LedgerError::NotFound(transaction_id))
    }

    /// Fetch one page of an account's transactions plus the total count.
    ///
    /// `page` starts at 1. An account with no transactions yields an empty
    /// page rather than an error.
    pub async fn list(
        &self,
        account_id: Uuid,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<TransactionDetail>, i64), LedgerError> {
        let offset = (page - 1) * per_page;

        let transactions = self
            .transactions
            .list_page(account_id, per_page, offset)
            .await?;
        let total_count = self.transactions.count_for_account(account_id).await?;

        Ok((transactions, total_count))
    }

    // =========================================================================
    // retry
    // =========================================================================

    /// Run one attempt of an atomic unit, retrying on lock contention.
    ///
    /// Only units that rolled back are re-run, so a retry never
    /// double-applies a write.
    async fn with_retry<T, F, Fut>(&self, op: F) -> Result<T, LedgerError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, LedgerError>>,
    {
        for attempt in 0..MAX_ATTEMPTS {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS - 1 => {
                    let delay = Duration::from_millis(RETRY_BACKOFF_MS * (attempt as u64 + 1));
                    tokio::time::sleep(delay).await;
                    tracing::warn!(
                        "Lock contention, retrying (attempt {}/{})",
                        attempt + 1,
                        MAX_ATTEMPTS
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(LedgerError::Contention)
    }
}
