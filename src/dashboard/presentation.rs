//! Turns aggregated totals into the series shown on the dashboard.
//!
//! Monthly series are limited to the most recent [MONTH_WINDOW] months.
//! Category series are ranked by total and each rank is given a color from
//! a fixed hue band: reds and oranges for expenses, greens and blues for income.

use std::{collections::HashMap, fmt::Display};

use serde::{Serialize, Serializer};

use crate::dashboard::{
    aggregation::{CategoryTotals, MonthlyBucket},
    normalize::MonthKey,
};

/// The number of most recent months shown in the monthly series.
pub const MONTH_WINDOW: usize = 12;

/// How far the hue moves, in degrees, from one category rank to the next.
pub const HUE_STEP: usize = 28;

/// A color in the HSL color space, written as a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HslColor {
    /// Hue in degrees.
    pub hue: u16,
    /// Saturation as a percentage.
    pub saturation: u8,
    /// Lightness as a percentage.
    pub lightness: u8,
}

impl Display for HslColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({} {}% {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A band of hues that category colors are picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// The hue of the top ranked category.
    pub base_hue: u16,
    /// The width of the hue band in degrees. Must not be zero.
    pub hue_span: u16,
    /// Saturation shared by every color in the palette.
    pub saturation: u8,
    /// Lightness shared by every color in the palette.
    pub lightness: u8,
}

/// Reds and oranges for expense categories.
pub const EXPENSE_PALETTE: Palette = Palette {
    base_hue: 6,
    hue_span: 60,
    saturation: 85,
    lightness: 55,
};

/// Greens and blues for income categories.
pub const INCOME_PALETTE: Palette = Palette {
    base_hue: 140,
    hue_span: 120,
    saturation: 75,
    lightness: 45,
};

impl Palette {
    /// The color for the category at `rank`, where rank 0 has the largest total.
    ///
    /// The hue is `base_hue + (rank * HUE_STEP) mod hue_span`, wrapped to the
    /// color wheel.
    pub fn color_for_rank(&self, rank: usize) -> HslColor {
        let span = usize::from(self.hue_span);
        let offset = if span == 0 {
            0
        } else {
            (rank % span) * HUE_STEP % span
        };

        HslColor {
            hue: ((usize::from(self.base_hue) + offset) % 360) as u16,
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }
}

/// Income and expense totals for one month of the monthly totals chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The month, normally `YYYY-MM`.
    pub month: MonthKey,
    /// Total income in the month.
    pub income: f64,
    /// Total expense in the month.
    pub expense: f64,
}

/// Income minus expense for one month of the monthly net chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyNet {
    /// The month, normally `YYYY-MM`.
    pub month: MonthKey,
    /// Income minus expense, negative for a deficit.
    pub net: f64,
}

/// One category of a category breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    /// The category label.
    pub name: String,
    /// The total amount for the category.
    pub value: f64,
    /// The color assigned to the category's rank.
    pub color: HslColor,
}

/// The most recent [MONTH_WINDOW] month keys in ascending order.
///
/// Returns every month if there are fewer. Months without data are never
/// added.
pub fn recent_months(months: &HashMap<MonthKey, MonthlyBucket>) -> Vec<&MonthKey> {
    let mut sorted: Vec<&MonthKey> = months.keys().collect();
    sorted.sort();

    let start = sorted.len().saturating_sub(MONTH_WINDOW);
    sorted.split_off(start)
}

/// Income and expense totals for the recent months, oldest first.
pub fn monthly_totals(months: &HashMap<MonthKey, MonthlyBucket>) -> Vec<MonthlyTotal> {
    recent_months(months)
        .into_iter()
        .map(|month| {
            let bucket = months[month];
            MonthlyTotal {
                month: month.clone(),
                income: bucket.income,
                expense: bucket.expense,
            }
        })
        .collect()
}

/// Net totals for the same months as [monthly_totals], oldest first.
pub fn monthly_net(months: &HashMap<MonthKey, MonthlyBucket>) -> Vec<MonthlyNet> {
    recent_months(months)
        .into_iter()
        .map(|month| MonthlyNet {
            month: month.clone(),
            net: months[month].net(),
        })
        .collect()
}

/// Rank categories by total, largest first, and color them from `palette`.
///
/// Categories with equal totals keep the order they were first seen in.
pub fn rank_categories(totals: &CategoryTotals, palette: &Palette) -> Vec<CategorySlice> {
    let mut ranked: Vec<(&str, f64)> = totals.iter().collect();
    // Stable sort, ties stay in discovery order.
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, (name, value))| CategorySlice {
            name: name.to_owned(),
            value,
            color: palette.color_for_rank(rank),
        })
        .collect()
}
