use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money;

/// Chart labels for the twelve calendar months, in order.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One labeled value in a series: `x` is the month label, `y` the amount
/// fixed to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: String,
}

/// A calendar year of monthly totals, named by the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub name: i32,
    pub data: Vec<SeriesPoint>,
}

/// A named metric ("Target", "Revenue", "Income") across one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub data: Vec<SeriesPoint>,
}

/// Twelve-month accumulator. Buckets start at zero and collect unrounded
/// decimals; rendering to points happens once, after all folding.
#[derive(Debug, Clone, Default)]
pub struct MonthlyBuckets {
    totals: [Decimal; 12],
}

impl MonthlyBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount into the bucket for a 1-based calendar month.
    /// Out-of-range months are ignored.
    pub fn add(&mut self, month: u32, amount: Decimal) {
        let Some(index) = (month as usize).checked_sub(1) else {
            return;
        };
        if let Some(total) = self.totals.get_mut(index) {
            *total += amount;
        }
    }

    pub fn total(&self) -> Decimal {
        self.totals.iter().copied().sum()
    }

    /// Render the twelve points, Jan..Dec, each formatted to two decimals.
    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.totals
            .into_iter()
            .zip(MONTH_LABELS)
            .map(|(total, label)| SeriesPoint {
                x: label.to_string(),
                y: money::format_amount(total),
            })
            .collect()
    }
}

/// Amount with its human-readable short form ("1.2K").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSummary {
    pub amount: String,
    pub abbreviation: String,
}

impl AmountSummary {
    pub fn from_decimal(value: Decimal) -> Self {
        Self {
            amount: money::format_amount(value),
            abbreviation: money::abbreviate(value),
        }
    }
}

/// Revenue against target for one sales agent in the performance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceItem {
    pub sales: String,
    pub revenue: AmountSummary,
    pub target: AmountSummary,
    pub percentage: String,
}

/// Monthly order trend payload: one series per year in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendReport {
    pub customer: Option<String>,
    pub sales: Option<String>,
    pub items: Vec<TrendSeries>,
}

/// Target vs revenue payload: Target, Revenue and Income series for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetVsRevenueReport {
    pub sales: Option<String>,
    pub year: i32,
    pub items: Vec<MetricSeries>,
}

/// Performance statistic payload for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub is_underperform: Option<bool>,
    pub month: String,
    pub items: Vec<PerformanceItem>,
}
