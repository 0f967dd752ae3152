//! waste_bank Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod ledger;
pub mod store;

// Infrastructure modules (used mainly by the binaries)
pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use domain::{Amount, AmountError, LedgerError};
pub use error::{AppError, AppResult};
pub use ledger::{CreateTransactionCommand, Ledger, UpdateTransactionCommand};
