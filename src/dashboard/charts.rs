//! ECharts options for the dashboard series.
//!
//! This module turns [DashboardAnalytics] into chart configurations:
//! - **Monthly Net**: bar chart of income minus expense, green or red by sign
//! - **Monthly Totals**: income and expense bars side by side
//! - **Expense/Income Breakdown**: pie charts using each category's assigned color
//!
//! The options are serialized for the ECharts library. Drawing them is up to
//! whoever embeds the options in a page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapPiece},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Pie, bar},
};

use crate::dashboard::{DashboardAnalytics, presentation::CategorySlice};

const INCOME_COLOR: &str = "#10B981";
const EXPENSE_COLOR: &str = "#EF4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration
    pub options: String,
}

/// Build the options for every dashboard chart that has data to show.
///
/// The category charts are left out when their series is empty so the caller
/// can show a "no data" message instead of an empty pie.
pub fn dashboard_charts(analytics: &DashboardAnalytics, currency_symbol: &str) -> Vec<DashboardChart> {
    let mut charts = vec![
        DashboardChart {
            id: "monthly-net-chart",
            options: monthly_net_chart(analytics, currency_symbol).to_string(),
        },
        DashboardChart {
            id: "monthly-totals-chart",
            options: monthly_totals_chart(analytics, currency_symbol).to_string(),
        },
    ];

    if let Some(chart) = category_chart(
        "Expense breakdown by topic",
        &analytics.expense_by_category,
        currency_symbol,
    ) {
        charts.push(DashboardChart {
            id: "expense-category-chart",
            options: chart.to_string(),
        });
    }

    if let Some(chart) = category_chart(
        "Income breakdown by topic",
        &analytics.income_by_category,
        currency_symbol,
    ) {
        charts.push(DashboardChart {
            id: "income-category-chart",
            options: chart.to_string(),
        });
    }

    charts
}

/// Bar chart of monthly net, green for a surplus and red for a deficit.
pub fn monthly_net_chart(analytics: &DashboardAnalytics, currency_symbol: &str) -> Chart {
    let labels: Vec<String> = analytics
        .monthly_net
        .iter()
        .map(|month| month.month.to_string())
        .collect();
    let values: Vec<f64> = analytics.monthly_net.iter().map(|month| month.net).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly net")
                .subtext("Income minus expense"),
        )
        .tooltip(currency_tooltip(currency_symbol))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency_symbol))),
        )
        .visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().lt(0).color(EXPENSE_COLOR),
            VisualMapPiece::new().gte(0).color(INCOME_COLOR),
        ]))
        .series(bar::Bar::new().name("Net").data(values))
}

/// Bar chart of monthly income and expense totals.
pub fn monthly_totals_chart(analytics: &DashboardAnalytics, currency_symbol: &str) -> Chart {
    let labels: Vec<String> = analytics
        .monthly_totals
        .iter()
        .map(|month| month.month.to_string())
        .collect();
    let income: Vec<f64> = analytics
        .monthly_totals
        .iter()
        .map(|month| month.income)
        .collect();
    let expense: Vec<f64> = analytics
        .monthly_totals
        .iter()
        .map(|month| month.expense)
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly totals")
                .subtext("Income vs expense"),
        )
        .tooltip(currency_tooltip(currency_symbol))
        .legend(Legend::new().right("4%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency_symbol))),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expense")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expense),
        )
}

/// Pie chart of category totals, or `None` if there are no categories.
pub fn category_chart(title: &str, slices: &[CategorySlice], currency_symbol: &str) -> Option<Chart> {
    if slices.is_empty() {
        return None;
    }

    let colors: Vec<Color> = slices
        .iter()
        .map(|slice| Color::from(slice.color.to_string().as_str()))
        .collect();
    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|slice| (slice.value, slice.name.as_str()))
        .collect();

    let chart = Chart::new()
        .title(Title::new().text(title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter(currency_symbol)),
        )
        .legend(Legend::new().bottom("0%"))
        .color(colors)
        .series(Pie::new().name(title).radius("70%").data(data));

    Some(chart)
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

#[inline]
fn currency_formatter(currency_symbol: &str) -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "return (number || number === 0) ? '{currency_symbol}' + Number(number).toFixed(2) : \"-\";"
        ),
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip(currency_symbol: &str) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter(currency_symbol))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use super::{category_chart, dashboard_charts};
    use crate::{
        dashboard::analyze,
        test_utils::{expense, income},
    };

    #[test]
    fn dashboard_charts_include_category_charts_with_data() {
        let analytics = analyze(&[
            income(1000.0, "Salary", "2024-01-05"),
            expense(300.0, "Food", "2024-01-10"),
        ]);

        let charts = dashboard_charts(&analytics, "₹");

        let ids: Vec<&str> = charts.iter().map(|chart| chart.id).collect();
        assert_eq!(
            ids,
            vec![
                "monthly-net-chart",
                "monthly-totals-chart",
                "expense-category-chart",
                "income-category-chart"
            ]
        );
    }

    #[test]
    fn dashboard_charts_leave_out_empty_category_charts() {
        let analytics = analyze(&[expense(300.0, "Food", "2024-01-10")]);

        let charts = dashboard_charts(&analytics, "₹");

        assert!(charts.iter().all(|chart| chart.id != "income-category-chart"));
        assert!(charts.iter().any(|chart| chart.id == "expense-category-chart"));
    }

    #[test]
    fn category_chart_uses_slice_names_and_colors() {
        let analytics = analyze(&[
            expense(300.0, "Food", "2024-01-10"),
            expense(100.0, "Fuel", "2024-01-12"),
        ]);

        let options = category_chart("Expenses", &analytics.expense_by_category, "₹")
            .expect("chart should be created for non-empty series")
            .to_string();

        assert!(options.contains("Food"));
        assert!(options.contains("Fuel"));
        assert!(options.contains("hsl(6 85% 55%)"));
        assert!(options.contains("hsl(34 85% 55%)"));
    }

    #[test]
    fn category_chart_is_none_without_data() {
        assert!(category_chart("Income", &[], "₹").is_none());
    }

    #[test]
    fn monthly_charts_label_months() {
        let analytics = analyze(&[
            expense(300.0, "Food", "2024-01-10"),
            expense(200.0, "Food", "2024-02-01"),
        ]);

        let charts = dashboard_charts(&analytics, "$");

        assert!(charts[0].options.contains("2024-01"));
        assert!(charts[1].options.contains("2024-02"));
    }
}
