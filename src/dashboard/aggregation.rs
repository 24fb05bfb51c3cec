//! Buckets normalized transactions by month and by category.
//!
//! Income and expense are summed independently, so a category that appears
//! as both income and expense is tracked once in each map.

use std::collections::HashMap;

use crate::{
    dashboard::normalize::{MonthKey, NormalizedTransaction},
    transaction::TransactionKind,
};

/// The income and expense totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyBucket {
    /// The sum of income amounts in the month.
    pub income: f64,
    /// The sum of expense amounts in the month.
    pub expense: f64,
}

impl MonthlyBucket {
    /// Add `amount` to the total for `kind`.
    pub fn add(&mut self, kind: TransactionKind, amount: f64) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expense += amount,
        }
    }

    /// Income minus expense, negative when more was spent than earned.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Running totals per category, remembering the order categories were first seen.
///
/// Discovery order is what breaks ties when categories are ranked by total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    positions: HashMap<String, usize>,
    totals: Vec<(String, f64)>,
}

impl CategoryTotals {
    /// Add `amount` to the total for `category`, creating it if needed.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.positions.get(category) {
            Some(&position) => self.totals[position].1 += amount,
            None => {
                self.positions
                    .insert(category.to_owned(), self.totals.len());
                self.totals.push((category.to_owned(), amount));
            }
        }
    }

    /// The total for `category`, if it has been seen.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.positions
            .get(category)
            .map(|&position| self.totals[position].1)
    }

    /// Categories and their totals in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no category has been seen.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Everything the presenter needs, computed in one pass over the transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    /// Income and expense totals keyed by month.
    pub months: HashMap<MonthKey, MonthlyBucket>,
    /// Totals of income transactions per category.
    pub income_by_category: CategoryTotals,
    /// Totals of expense transactions per category.
    pub expense_by_category: CategoryTotals,
}

/// Sum normalized transactions by month and by category.
///
/// Empty input gives empty maps.
pub fn aggregate<I>(transactions: I) -> Aggregates
where
    I: IntoIterator<Item = NormalizedTransaction>,
{
    let mut aggregates = Aggregates::default();

    for transaction in transactions {
        aggregates
            .months
            .entry(transaction.month)
            .or_default()
            .add(transaction.kind, transaction.amount);

        let categories = match transaction.kind {
            TransactionKind::Income => &mut aggregates.income_by_category,
            TransactionKind::Expense => &mut aggregates.expense_by_category,
        };
        categories.add(&transaction.category, transaction.amount);
    }

    aggregates
}
