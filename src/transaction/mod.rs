//! Transactions: the raw records the dashboard is computed from.
//!
//! This module contains:
//! - The loosely-typed [Transaction] record as it comes out of the store or a
//!   JSON export, with [TransactionKind] and [RawAmount]
//! - [NewTransaction] and the database functions for recording and querying
//!   the transaction log

mod core;
mod record;

pub use core::{
    DEFAULT_CURRENCY, NewTransaction, count_transactions, create_transaction,
    create_transaction_table, get_recent_transactions, map_transaction_row,
};
pub use record::{RawAmount, Transaction, TransactionId, TransactionKind};
