//! Dashboard module
//!
//! Computes everything the dashboard shows from a list of raw transactions.
//! The pipeline runs in three stages, each a pure function of its input:
//! [normalize] resolves every transaction's month, amount, kind and
//! category, [aggregation] sums them by month and category, and
//! [presentation] windows, ranks and colors the totals. [summary] provides
//! the headline totals and [charts] the chart options built on top.

pub mod aggregation;
pub mod charts;
pub mod normalize;
pub mod presentation;
pub mod summary;

use serde::Serialize;

use crate::{
    dashboard::{
        aggregation::aggregate,
        normalize::Normalizer,
        presentation::{
            CategorySlice, EXPENSE_PALETTE, INCOME_PALETTE, MonthlyNet, MonthlyTotal,
            monthly_net, monthly_totals, rank_categories,
        },
    },
    transaction::Transaction,
};

pub use charts::{DashboardChart, dashboard_charts};
pub use summary::{DashboardSummary, RECENT_TRANSACTION_COUNT, recent_transactions, summarize};

/// The four series shown on the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardAnalytics {
    /// Income and expense per month for the most recent twelve months.
    pub monthly_totals: Vec<MonthlyTotal>,
    /// Income minus expense for the same months as `monthly_totals`.
    pub monthly_net: Vec<MonthlyNet>,
    /// Expense totals per category, largest first.
    pub expense_by_category: Vec<CategorySlice>,
    /// Income totals per category, largest first.
    pub income_by_category: Vec<CategorySlice>,
}

/// Compute the dashboard series using the default [Normalizer].
///
/// See [analyze_with].
pub fn analyze(transactions: &[Transaction]) -> DashboardAnalytics {
    analyze_with(&Normalizer::default(), transactions)
}

/// Compute the dashboard series from `transactions`.
///
/// The result only depends on the transactions, not on their order, except
/// that categories with equal totals are listed in the order they first
/// appear. An empty list gives empty series.
pub fn analyze_with(normalizer: &Normalizer, transactions: &[Transaction]) -> DashboardAnalytics {
    let aggregates = aggregate(
        transactions
            .iter()
            .map(|transaction| normalizer.normalize(transaction)),
    );

    let analytics = DashboardAnalytics {
        monthly_totals: monthly_totals(&aggregates.months),
        monthly_net: monthly_net(&aggregates.months),
        expense_by_category: rank_categories(&aggregates.expense_by_category, &EXPENSE_PALETTE),
        income_by_category: rank_categories(&aggregates.income_by_category, &INCOME_PALETTE),
    };

    tracing::debug!(
        "Analyzed {} transactions into {} months, {} expense and {} income categories",
        transactions.len(),
        aggregates.months.len(),
        analytics.expense_by_category.len(),
        analytics.income_by_category.len()
    );

    analytics
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use super::{DashboardAnalytics, analyze, analyze_with};
    use crate::{
        dashboard::{
            normalize::{DEFAULT_CATEGORY, Normalizer},
            presentation::MONTH_WINDOW,
        },
        db::initialize,
        test_utils::{expense, income},
        timezone::get_timezone,
        transaction::{
            NewTransaction, RawAmount, Transaction, TransactionKind, create_transaction,
            get_recent_transactions,
        },
    };

    fn scenario_a() -> Vec<Transaction> {
        vec![
            income(1000.0, "Salary", "2024-01-05"),
            expense(300.0, "Food", "2024-01-10"),
            expense(200.0, "Food", "2024-02-01"),
        ]
    }

    fn months(analytics: &DashboardAnalytics) -> Vec<&str> {
        analytics
            .monthly_totals
            .iter()
            .map(|total| total.month.as_str())
            .collect()
    }

    #[test]
    fn analyze_salary_and_food() {
        let analytics = analyze(&scenario_a());

        assert_eq!(months(&analytics), vec!["2024-01", "2024-02"]);
        assert_eq!(analytics.monthly_totals[0].income, 1000.0);
        assert_eq!(analytics.monthly_totals[0].expense, 300.0);
        assert_eq!(analytics.monthly_totals[1].income, 0.0);
        assert_eq!(analytics.monthly_totals[1].expense, 200.0);

        let net: Vec<f64> = analytics.monthly_net.iter().map(|m| m.net).collect();
        assert_eq!(net, vec![700.0, -200.0]);

        assert_eq!(analytics.expense_by_category.len(), 1);
        assert_eq!(analytics.expense_by_category[0].name, "Food");
        assert_eq!(analytics.expense_by_category[0].value, 500.0);
        assert_eq!(analytics.expense_by_category[0].color.to_string(), "hsl(6 85% 55%)");

        assert_eq!(analytics.income_by_category.len(), 1);
        assert_eq!(analytics.income_by_category[0].name, "Salary");
        assert_eq!(analytics.income_by_category[0].color.to_string(), "hsl(140 75% 45%)");
    }

    #[test]
    fn analyze_missing_category_and_dates() {
        let transactions = vec![
            Transaction {
                kind: Some("expense".to_owned()),
                amount: RawAmount::Number(20.0),
                ..Default::default()
            },
            Transaction {
                kind: Some("expense".to_owned()),
                topic: Some("  ".to_owned()),
                amount: RawAmount::Text("5".to_owned()),
                date: Some(String::new()),
                ..Default::default()
            },
        ];

        let analytics = analyze(&transactions);

        assert_eq!(months(&analytics), vec![""]);
        assert_eq!(analytics.monthly_totals[0].expense, 25.0);
        assert_eq!(analytics.expense_by_category.len(), 1);
        assert_eq!(analytics.expense_by_category[0].name, DEFAULT_CATEGORY);
        assert_eq!(analytics.expense_by_category[0].value, 25.0);
    }

    #[test]
    fn analyze_empty_input() {
        let analytics = analyze(&[]);

        assert_eq!(analytics, DashboardAnalytics::default());
        assert!(analytics.monthly_totals.is_empty());
        assert!(analytics.monthly_net.is_empty());
        assert!(analytics.expense_by_category.is_empty());
        assert!(analytics.income_by_category.is_empty());
    }

    #[test]
    fn analyze_keeps_twelve_most_recent_of_fifteen_months() {
        let transactions: Vec<Transaction> = (0..15)
            .map(|i| {
                let year = 2023 + i / 12;
                let month = i % 12 + 1;
                expense(10.0, "Rent", &format!("{year}-{month:02}-15"))
            })
            .collect();

        let analytics = analyze(&transactions);

        assert_eq!(analytics.monthly_totals.len(), MONTH_WINDOW);
        assert_eq!(analytics.monthly_net.len(), MONTH_WINDOW);
        let got = months(&analytics);
        assert_eq!(got.first(), Some(&"2023-04"));
        assert_eq!(got.last(), Some(&"2024-03"));
        // Category totals are not windowed.
        assert_eq!(analytics.expense_by_category[0].value, 150.0);
    }

    #[test]
    fn analyze_is_independent_of_input_order() {
        let transactions = vec![
            income(1000.0, "Salary", "2024-01-05"),
            expense(300.0, "Food", "2024-01-10"),
            expense(120.0, "Fuel", "2024-03-02"),
            income(250.0, "Freelance", "2024-03-20"),
            expense(200.0, "Food", "2024-02-01"),
            expense(45.0, "Books", "2023-12-24"),
        ];
        let mut reversed = transactions.clone();
        reversed.reverse();
        let mut rotated = transactions.clone();
        rotated.rotate_left(2);

        let want = analyze(&transactions);

        assert_eq!(analyze(&reversed), want);
        assert_eq!(analyze(&rotated), want);
    }

    #[test]
    fn analyze_breaks_category_ties_by_first_appearance() {
        let transactions = vec![
            expense(50.0, "Fuel", "2024-01-01"),
            expense(50.0, "Books", "2024-01-02"),
            expense(80.0, "Rent", "2024-01-03"),
        ];

        let analytics = analyze(&transactions);

        let names: Vec<&str> = analytics
            .expense_by_category
            .iter()
            .map(|slice| slice.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rent", "Fuel", "Books"]);
    }

    #[test]
    fn analyze_with_timezone_moves_month_boundaries() {
        let transactions = vec![expense(10.0, "Food", "2024-01-31T20:00:00Z")];
        let normalizer = Normalizer::default().timezone(get_timezone("Asia/Kolkata").unwrap());

        let utc = analyze(&transactions);
        let kolkata = analyze_with(&normalizer, &transactions);

        assert_eq!(months(&utc), vec!["2024-01"]);
        assert_eq!(months(&kolkata), vec!["2024-02"]);
    }

    #[test]
    fn analyze_transactions_from_store() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        for (kind, topic, amount, date) in [
            (TransactionKind::Income, "Salary", 1000.0, date!(2024 - 01 - 05)),
            (TransactionKind::Expense, "Food", 300.0, date!(2024 - 01 - 10)),
            (TransactionKind::Expense, "Food", 200.0, date!(2024 - 02 - 01)),
        ] {
            create_transaction(NewTransaction::build(kind, topic, amount, date), &conn).unwrap();
        }
        let transactions = get_recent_transactions(100, &conn).unwrap();

        let analytics = analyze(&transactions);

        assert_eq!(analytics, analyze(&scenario_a()));
    }

    #[test]
    fn analytics_serialize_for_the_presentation_layer() {
        let analytics = analyze(&scenario_a());

        let value = serde_json::to_value(&analytics).unwrap();

        assert_eq!(
            value["monthly_totals"][1],
            serde_json::json!({ "month": "2024-02", "income": 0.0, "expense": 200.0 })
        );
        assert_eq!(
            value["monthly_net"][0],
            serde_json::json!({ "month": "2024-01", "net": 700.0 })
        );
        assert_eq!(value["expense_by_category"][0]["color"], "hsl(6 85% 55%)");
    }
}
