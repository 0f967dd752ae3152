//! Transaction entities
//!
//! Plain data carried between the stores, the ledger and the API layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A transaction row as stored, including the foreign key columns.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount: i64,
    pub weight: Option<Decimal>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A garbage category a transaction may reference.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// A transaction prepared for rendering: the category reference is resolved
/// to the category itself and raw foreign key columns are dropped.
#[derive(Debug, Clone)]
pub struct TransactionDetail {
    pub id: Uuid,
    pub amount: i64,
    pub weight: Option<Decimal>,
    pub note: Option<String>,
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
