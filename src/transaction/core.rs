//! Recording and querying the transaction log.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    transaction::{RawAmount, Transaction, TransactionKind},
};

/// The currency recorded when none is given.
pub const DEFAULT_CURRENCY: &str = "INR";

// ============================================================================
// MODELS
// ============================================================================

/// A transaction that has not been recorded yet.
///
/// To create a new `NewTransaction`, use [NewTransaction::build].
#[derive(Debug, PartialEq, Clone)]
pub struct NewTransaction {
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,

    /// What the transaction was for, e.g. "Salary" or "Groceries".
    ///
    /// Surrounding whitespace is removed before the transaction is stored.
    pub topic: String,

    /// The amount of money, always positive.
    ///
    /// The direction of the money is given by `kind`, never by the sign.
    pub amount: f64,

    /// The ISO 4217 currency code. Defaults to [DEFAULT_CURRENCY].
    pub currency: String,

    /// The date the transaction happened.
    pub occurred_at: Date,
}

impl NewTransaction {
    /// Start building a new transaction.
    pub fn build(kind: TransactionKind, topic: &str, amount: f64, occurred_at: Date) -> Self {
        Self {
            kind,
            topic: topic.to_owned(),
            amount,
            currency: DEFAULT_CURRENCY.to_owned(),
            occurred_at,
        }
    }

    /// Set the currency code for the transaction.
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Record a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTopic] if the topic is blank,
/// - or [Error::InvalidAmount] if the amount is not a finite number greater than zero,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let topic = new_transaction.topic.trim();

    if topic.is_empty() {
        return Err(Error::EmptyTopic);
    }

    if !new_transaction.amount.is_finite() || new_transaction.amount <= 0.0 {
        return Err(Error::InvalidAmount(new_transaction.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (type, topic, amount, currency, occurred_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, type, topic, amount, currency, occurred_at, created_at",
        )?
        .query_row(
            (
                new_transaction.kind.as_str(),
                topic,
                new_transaction.amount,
                &new_transaction.currency,
                new_transaction.occurred_at,
            ),
            map_transaction_row,
        )?;

    tracing::debug!(
        "Recorded {} transaction {:?} for {}",
        new_transaction.kind,
        transaction.id,
        new_transaction.occurred_at
    );

    Ok(transaction)
}

/// Get the `limit` most recent transactions, newest first.
///
/// Transactions are ordered by the date they occurred, with the most recently
/// recorded transaction first when dates are equal.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, type, topic, amount, currency, occurred_at, created_at
             FROM \"transaction\"
             ORDER BY occurred_at DESC, id DESC
             LIMIT ?1",
        )?
        .query_map([limit], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()?;

    tracing::debug!("Loaded {} of at most {limit} transactions", transactions.len());

    Ok(transactions)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                topic TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                currency TEXT NOT NULL DEFAULT 'INR',
                occurred_at TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
        (),
    )?;

    // Used by the recent transactions query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_occurred_at ON \"transaction\"(occurred_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let topic = row.get(2)?;
    let amount: f64 = row.get(3)?;
    let currency = row.get(4)?;
    let occurred_at = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Transaction {
        id: Some(id),
        kind: Some(kind),
        topic: Some(topic),
        amount: RawAmount::Number(amount),
        currency: Some(currency),
        occurred_at: Some(occurred_at),
        date: None,
        created_at: Some(created_at),
    })
}

// ============================================================================
// TESTS
// ============================================================================
