#![allow(missing_docs)]

use crate::transaction::{RawAmount, Transaction};

/// A raw transaction as the store would return it.
pub(crate) fn transaction(kind: &str, amount: f64, topic: &str, occurred_at: &str) -> Transaction {
    Transaction {
        kind: Some(kind.to_owned()),
        topic: Some(topic.to_owned()),
        amount: RawAmount::Number(amount),
        occurred_at: Some(occurred_at.to_owned()),
        ..Default::default()
    }
}

pub(crate) fn income(amount: f64, topic: &str, occurred_at: &str) -> Transaction {
    transaction("income", amount, topic, occurred_at)
}

pub(crate) fn expense(amount: f64, topic: &str, occurred_at: &str) -> Transaction {
    transaction("expense", amount, topic, occurred_at)
}
