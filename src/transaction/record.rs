//! The raw transaction record and its lenient deserialization.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money that came in, e.g. a salary payment.
    Income,
    /// Money that went out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// Classify a raw `type` value from a stored record.
    ///
    /// Only the literal `"income"` is income. Anything else, including a
    /// missing value or an unknown label, is treated as an expense. This is a
    /// lenient default for records from an external store, not a validation
    /// step; use [TransactionKind::from_str] to validate user input.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("income") => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }

    /// The label used for this kind in stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidKind(s.to_owned())),
        }
    }
}

/// A monetary amount exactly as it was found in a record.
///
/// Stores and exports are not consistent about amounts: they may be numbers,
/// numeric strings or missing entirely. The dashboard resolves the value
/// later, see [crate::dashboard::normalize::resolve_amount].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawAmount {
    /// A JSON number.
    Number(f64),
    /// A string that may or may not hold a number, e.g. `"12.50"`.
    Text(String),
    /// The amount was absent, `null` or not a number or string.
    #[default]
    Missing,
}

impl From<Value> for RawAmount {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map_or(RawAmount::Missing, RawAmount::Number),
            Value::String(text) => RawAmount::Text(text),
            _ => RawAmount::Missing,
        }
    }
}

impl From<RawAmount> for Value {
    fn from(amount: RawAmount) -> Self {
        match amount {
            RawAmount::Number(number) => serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RawAmount::Text(text) => Value::String(text),
            RawAmount::Missing => Value::Null,
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

/// An expense or income as recorded in the transaction store.
///
/// The record is deliberately loose: every field may be missing and the
/// effective date may live in any of `occurred_at`, `date` or `created_at`.
/// Field names follow the store's column names, with `kind` and `category`
/// accepted in place of `type` and `topic`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LooseRecord")]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TransactionId>,

    /// The raw kind label, normally `"income"` or `"expense"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The user's label for what the transaction was for, e.g. "Salary".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// The amount of money earned or spent.
    pub amount: RawAmount,

    /// The ISO 4217 currency code, e.g. "INR".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// When the transaction happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,

    /// An alternative name for when the transaction happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// When the transaction was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A stored record as found, before `type`/`kind` and `topic`/`category` are merged.
///
/// Records may carry both names for the same field, so each is read separately.
#[derive(Default, Deserialize)]
#[serde(default)]
struct LooseRecord {
    #[serde(deserialize_with = "lenient_id")]
    id: Option<TransactionId>,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    type_: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    kind: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    topic: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    category: Option<String>,
    amount: RawAmount,
    #[serde(deserialize_with = "lenient_text")]
    currency: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    occurred_at: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    created_at: Option<String>,
}

impl From<LooseRecord> for Transaction {
    fn from(record: LooseRecord) -> Self {
        Self {
            id: record.id,
            kind: record.type_.or(record.kind),
            topic: record.topic.or(record.category),
            amount: record.amount,
            currency: record.currency,
            occurred_at: record.occurred_at,
            date: record.date,
            created_at: record.created_at,
        }
    }
}

/// Accepts strings and numbers as text, anything else becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Accepts integers and integer strings, anything else becomes `None`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<TransactionId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use crate::{
        Error,
        transaction::{RawAmount, Transaction, TransactionKind},
    };

    #[test]
    fn from_raw_only_recognises_literal_income() {
        assert_eq!(
            TransactionKind::from_raw(Some("income")),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::from_raw(Some("expense")),
            TransactionKind::Expense
        );
        assert_eq!(
            TransactionKind::from_raw(Some("Income")),
            TransactionKind::Expense
        );
        assert_eq!(
            TransactionKind::from_raw(Some("refund")),
            TransactionKind::Expense
        );
        assert_eq!(TransactionKind::from_raw(None), TransactionKind::Expense);
    }

    #[test]
    fn from_str_rejects_unknown_kinds() {
        assert_eq!(
            TransactionKind::from_str(" Income "),
            Ok(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::from_str("refund"),
            Err(Error::InvalidKind("refund".to_owned()))
        );
    }

    #[test]
    fn deserializes_store_record() {
        let record = json!({
            "id": 42,
            "user_id": "c0ffee",
            "type": "income",
            "topic": "Salary",
            "amount": 1000.5,
            "currency": "INR",
            "occurred_at": "2024-01-05",
            "metadata": {}
        });

        let transaction: Transaction = serde_json::from_value(record).unwrap();

        assert_eq!(transaction.id, Some(42));
        assert_eq!(transaction.kind.as_deref(), Some("income"));
        assert_eq!(transaction.topic.as_deref(), Some("Salary"));
        assert_eq!(transaction.amount, RawAmount::Number(1000.5));
        assert_eq!(transaction.occurred_at.as_deref(), Some("2024-01-05"));
        assert_eq!(transaction.date, None);
    }

    #[test]
    fn deserializes_malformed_record_without_error() {
        let record = json!({
            "id": "not a number",
            "kind": 7,
            "category": null,
            "amount": true,
            "date": ["2024-01-05"]
        });

        let transaction: Transaction = serde_json::from_value(record).unwrap();

        assert_eq!(transaction.id, None);
        assert_eq!(transaction.kind.as_deref(), Some("7"));
        assert_eq!(transaction.topic, None);
        assert_eq!(transaction.amount, RawAmount::Missing);
        assert_eq!(transaction.date, None);
    }

    #[test]
    fn deserializes_record_with_both_field_names() {
        let record = json!({
            "type": "income",
            "kind": "expense",
            "topic": "Salary",
            "category": "Food",
            "amount": 5
        });

        let transaction: Transaction = serde_json::from_value(record).unwrap();

        assert_eq!(transaction.kind.as_deref(), Some("income"));
        assert_eq!(transaction.topic.as_deref(), Some("Salary"));
        assert_eq!(transaction.amount, RawAmount::Number(5.0));
    }

    #[test]
    fn falls_back_to_alternative_field_names() {
        let record = json!({ "type": null, "kind": "income", "category": "Salary" });

        let transaction: Transaction = serde_json::from_value(record).unwrap();

        assert_eq!(transaction.kind.as_deref(), Some("income"));
        assert_eq!(transaction.topic.as_deref(), Some("Salary"));
    }

    #[test]
    fn deserializes_empty_object() {
        let transaction: Transaction = serde_json::from_value(json!({})).unwrap();

        assert_eq!(transaction, Transaction::default());
    }

    #[test]
    fn amount_text_is_kept_verbatim() {
        let transaction: Transaction =
            serde_json::from_value(json!({ "amount": " 12.50 " })).unwrap();

        assert_eq!(transaction.amount, RawAmount::Text(" 12.50 ".to_owned()));
    }

    #[test]
    fn serializes_with_store_field_names() {
        let transaction = Transaction {
            kind: Some("expense".to_owned()),
            topic: Some("Food".to_owned()),
            amount: RawAmount::Number(12.5),
            occurred_at: Some("2024-02-01".to_owned()),
            ..Default::default()
        };

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "expense",
                "topic": "Food",
                "amount": 12.5,
                "occurred_at": "2024-02-01"
            })
        );
    }
}
