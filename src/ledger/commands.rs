//! Command definitions
//!
//! Commands represent intentions to change the transaction history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// CreateTransactionCommand
// =========================================================================

/// Command to record a new deposit transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionCommand {
    /// Account the transaction belongs to
    pub account_id: Uuid,
    /// Optional garbage category reference
    pub category_id: Option<Uuid>,
    /// Signed amount in the smallest currency unit
    pub amount: i64,
    /// Optional deposited weight in kilograms
    pub weight: Option<Decimal>,
    /// Optional free-form note
    pub note: Option<String>,
}

impl CreateTransactionCommand {
    pub fn new(account_id: Uuid, amount: i64) -> Self {
        Self {
            account_id,
            category_id: None,
            amount,
            weight: None,
            note: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

// =========================================================================
// UpdateTransactionCommand
// =========================================================================

/// Command to partially update an existing transaction.
///
/// `None` fields keep their stored values. Fields cannot be cleared back
/// to NULL through this command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTransactionCommand {
    pub category_id: Option<Uuid>,
    pub amount: Option<i64>,
    pub weight: Option<Decimal>,
    pub note: Option<String>,
}

impl UpdateTransactionCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    /// Check whether the command carries any field to write. An empty
    /// command leaves the row untouched.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.amount.is_none()
            && self.weight.is_none()
            && self.note.is_none()
    }
}
