//! Headline totals for the dashboard summary cards.
//!
//! Unlike the chart series these cover every transaction passed in, not just
//! the most recent twelve months.

use serde::Serialize;

use crate::{
    dashboard::normalize::resolve_amount,
    transaction::{Transaction, TransactionKind},
};

/// The number of transactions shown in the recent transactions list.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// Total income, total expense and the resulting balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// Total income minus total expense.
    pub net_balance: f64,
    /// The number of transactions summarized.
    pub transaction_count: usize,
    /// How many of the transactions are income.
    pub income_count: usize,
    /// How many of the transactions are expenses.
    pub expense_count: usize,
}

impl DashboardSummary {
    /// Whether more has been spent than earned.
    pub fn is_deficit(&self) -> bool {
        self.net_balance < 0.0
    }
}

/// Summarize `transactions` using the same amount and kind rules as the charts.
pub fn summarize(transactions: &[Transaction]) -> DashboardSummary {
    let mut summary = DashboardSummary {
        transaction_count: transactions.len(),
        ..Default::default()
    };

    for transaction in transactions {
        let amount = resolve_amount(&transaction.amount);
        match TransactionKind::from_raw(transaction.kind.as_deref()) {
            TransactionKind::Income => {
                summary.total_income += amount;
                summary.income_count += 1;
            }
            TransactionKind::Expense => {
                summary.total_expense += amount;
                summary.expense_count += 1;
            }
        }
    }

    summary.net_balance = summary.total_income - summary.total_expense;
    summary
}

/// The first `count` transactions.
///
/// The store returns transactions newest first, so these are the most recent.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> &[Transaction] {
    &transactions[..count.min(transactions.len())]
}
