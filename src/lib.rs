//! Fintrack is a personal finance tracker for recording income and expenses.
//!
//! The core of this library is the dashboard aggregation engine in
//! [dashboard], which turns a raw, loosely-typed transaction log into the
//! series that drive the dashboard charts: monthly totals, monthly net and
//! category breakdowns with stable colors. Around it sit a small SQLite
//! transaction log and the helpers used by the `fintrack` command line tool.

#![warn(missing_docs)]

pub mod config;
pub mod dashboard;
mod db;
pub mod format;
pub mod logging;
#[cfg(test)]
mod test_utils;
pub mod timezone;
pub mod transaction;

pub use config::DashboardConfig;
pub use dashboard::{DashboardAnalytics, analyze, analyze_with};
pub use db::initialize as initialize_db;
pub use transaction::{NewTransaction, RawAmount, Transaction, TransactionId, TransactionKind};

/// The errors that may occur outside of the aggregation engine.
///
/// The engine itself never fails: malformed transactions are resolved with
/// documented defaults. These errors come from recording transactions,
/// talking to the database and reading configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A new transaction was given a topic that is empty after trimming.
    #[error("the transaction topic cannot be empty")]
    EmptyTopic,

    /// A new transaction was given an amount that is not a finite, positive number.
    ///
    /// Whether money came in or went out is recorded by the transaction kind,
    /// so amounts are always stored as positive numbers.
    #[error("{0} is not a valid amount, amounts must be positive numbers")]
    InvalidAmount(f64),

    /// A transaction kind other than "income" or "expense" was entered.
    #[error("unknown transaction kind \"{0}\", expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// The timezone is not a canonical timezone name, e.g. "Asia/Kolkata".
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing dashboard data as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
