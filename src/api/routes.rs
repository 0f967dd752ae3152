//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::TransactionDetail;
use crate::error::AppError;
use crate::ledger::{CreateTransactionCommand, Ledger, UpdateTransactionCommand};
use crate::store::AccountStore;

/// Largest accepted page size
const MAX_PER_PAGE: i64 = 100;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub amount: i64,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

/// Rendered transaction. Raw foreign key columns are deliberately absent;
/// the category reference comes back resolved or not at all.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub amount: i64,
    pub weight: Option<Decimal>,
    pub note: Option<String>,
    pub category: Option<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionDetail> for TransactionResponse {
    fn from(detail: TransactionDetail) -> Self {
        Self {
            id: detail.id,
            amount: detail.amount,
            weight: detail.weight,
            note: detail.note,
            category: detail.category.map(|c| CategoryResponse {
                id: c.id,
                name: c.name,
            }),
            created_at: detail.created_at,
            updated_at: detail.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub total_count: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub account_id: Uuid,
    pub balance: i64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        // Transaction CRUD
        .route("/transactions", post(create_transaction))
        .route("/transactions/:transaction_id", get(get_transaction))
        .route("/transactions/:transaction_id", patch(update_transaction))
        .route("/transactions/:transaction_id", delete(delete_transaction))
        // Per-account views
        .route(
            "/accounts/:account_id/transactions",
            get(list_transactions),
        )
        .route("/accounts/:account_id/balance", get(get_account_balance))
}

// =========================================================================
// POST /transactions
// =========================================================================

/// Record a new transaction
async fn create_transaction(
    State(pool): State<PgPool>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let ledger = Ledger::new(pool);

    let mut command = CreateTransactionCommand::new(request.account_id, request.amount);
    if let Some(category_id) = request.category_id {
        command = command.with_category(category_id);
    }
    if let Some(weight) = request.weight {
        command = command.with_weight(weight);
    }
    if let Some(note) = request.note {
        command = command.with_note(note);
    }

    let detail = ledger.create(&command).await?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

// =========================================================================
// GET /transactions/:transaction_id
// =========================================================================

/// Get transaction by ID
async fn get_transaction(
    State(pool): State<PgPool>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionResponse>, AppError> {
    let ledger = Ledger::new(pool);

    let detail = ledger.get(transaction_id).await?;

    Ok(Json(detail.into()))
}

// =========================================================================
// PATCH /transactions/:transaction_id
// =========================================================================

/// Partially update a transaction
async fn update_transaction(
    State(pool): State<PgPool>,
    Path(transaction_id): Path<Uuid>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let ledger = Ledger::new(pool);

    let mut command = UpdateTransactionCommand::new();
    if let Some(category_id) = request.category_id {
        command = command.with_category(category_id);
    }
    if let Some(amount) = request.amount {
        command = command.with_amount(amount);
    }
    if let Some(weight) = request.weight {
        command = command.with_weight(weight);
    }
    if let Some(note) = request.note {
        command = command.with_note(note);
    }

    let detail = ledger.update(transaction_id, &command).await?;

    Ok(Json(detail.into()))
}

// =========================================================================
// DELETE /transactions/:transaction_id
// =========================================================================

/// Delete a transaction and reverse its balance contribution
async fn delete_transaction(
    State(pool): State<PgPool>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let ledger = Ledger::new(pool);

    ledger.delete(transaction_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// GET /accounts/:account_id/transactions
// =========================================================================

/// List an account's transactions, newest first, paginated
async fn list_transactions(
    State(pool): State<PgPool>,
    Path(account_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionListResponse>, AppError> {
    if query.page < 1 {
        return Err(AppError::InvalidRequest(
            "page must be at least 1".to_string(),
        ));
    }
    if query.per_page < 1 || query.per_page > MAX_PER_PAGE {
        return Err(AppError::InvalidRequest(format!(
            "per_page must be between 1 and {}",
            MAX_PER_PAGE
        )));
    }

    let ledger = Ledger::new(pool);

    let (transactions, total_count) = ledger
        .list(account_id, query.page, query.per_page)
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
        total_count,
        page: query.page,
        per_page: query.per_page,
        total_pages: total_pages(total_count, query.per_page),
    }))
}

/// Total number of pages; an empty history still has one (empty) page.
fn total_pages(total_count: i64, per_page: i64) -> i64 {
    if total_count == 0 {
        1
    } else {
        (total_count + per_page - 1) / per_page
    }
}

// =========================================================================
// GET /accounts/:account_id/balance
// =========================================================================

/// Get the cached balance for an account
async fn get_account_balance(
    State(pool): State<PgPool>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<BalanceResponse>, AppError> {
    let accounts = AccountStore::new(pool);

    let balance = accounts.balance(account_id).await?;

    Ok(Json(BalanceResponse {
        account_id,
        balance,
    }))
}
