//! Ledger module
//!
//! The transaction-balance synchronizer and its command types.

mod commands;
mod service;

#[cfg(test)]
mod tests;

pub use commands::{CreateTransactionCommand, UpdateTransactionCommand};
pub use service::Ledger;
