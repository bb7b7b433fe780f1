use chrono::Datelike;

use crate::modules::reports::models::{MetricSeries, MonthlyBuckets};
use crate::modules::reports::repositories::{OrderRecord, TargetRecord};

/// Fold one year of targets and orders into the three fixed series
/// [Target, Revenue, Income], 12 monthly points each.
pub fn build(year: i32, targets: &[TargetRecord], orders: &[OrderRecord]) -> Vec<MetricSeries> {
    let mut target_buckets = MonthlyBuckets::new();
    let mut revenue_buckets = MonthlyBuckets::new();
    let mut income_buckets = MonthlyBuckets::new();

    for target in targets {
        if target.active_date.year() == year {
            target_buckets.add(target.active_date.month(), target.amount);
        }
    }

    for order in orders {
        if order.created_at.year() != year {
            continue;
        }

        let month = order.created_at.month();
        revenue_buckets.add(month, order.revenue());
        income_buckets.add(month, order.income());
    }

    vec![
        MetricSeries {
            name: "Target".to_string(),
            data: target_buckets.into_points(),
        },
        MetricSeries {
            name: "Revenue".to_string(),
            data: revenue_buckets.into_points(),
        },
        MetricSeries {
            name: "Income".to_string(),
            data: income_buckets.into_points(),
        },
    ]
}
