//! Store module
//!
//! Persistence services for accounts and transactions.

mod accounts;
mod transactions;

pub use accounts::AccountStore;
pub use transactions::TransactionStore;
