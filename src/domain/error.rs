//! Domain Error Types
//!
//! Errors surfaced by ledger operations. Every failure of an atomic unit
//! maps onto exactly one of these kinds.

use thiserror::Error;
use uuid::Uuid;

use super::amount::AmountError;

/// SQLSTATE codes Postgres raises when an atomic unit loses a lock race:
/// serialization_failure, deadlock_detected, lock_not_available.
const CONTENTION_CODES: [&str; 3] = ["40001", "40P01", "55P03"];

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction row does not exist
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Referenced account does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Applying the delta would take the balance below zero
    #[error("Insufficient funds: delta {delta} against balance {balance}")]
    InsufficientFunds { balance: i64, delta: i64 },

    /// The atomic unit lost a lock race and was rolled back
    #[error("Aborted by lock contention, safe to retry")]
    Contention,

    /// Amount failed domain validation
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Unexpected database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl LedgerError {
    /// Check if retrying the whole operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention)
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::AccountNotFound(_)
                | Self::InsufficientFunds { .. }
                | Self::InvalidAmount(_)
        )
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        if is_lock_contention(&err) {
            Self::Contention
        } else {
            Self::Database(err)
        }
    }
}

/// Check whether a database error is one of the lock contention SQLSTATEs.
pub(crate) fn is_lock_contention(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| CONTENTION_CODES.contains(&code.as_ref()))
        .unwrap_or(false)
}

/// Check whether a database error is a foreign key violation (23503).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.as_ref() == "23503")
        .unwrap_or(false)
}
