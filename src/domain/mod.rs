//! Domain module
//!
//! Core domain types and business logic.

pub mod amount;
pub mod error;
pub mod transaction;

pub use amount::{Amount, AmountError};
pub use error::LedgerError;
pub use transaction::{Category, Transaction, TransactionDetail};
