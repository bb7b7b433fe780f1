use chrono::Datelike;

use crate::modules::reports::models::{MonthlyBuckets, TrendSeries};
use crate::modules::reports::repositories::OrderRecord;

/// Fold orders into one 12-month revenue series per year in
/// [start_year, end_year]. Years with no orders keep their zero series.
pub fn build(start_year: i32, end_year: i32, orders: &[OrderRecord]) -> Vec<TrendSeries> {
    let mut buckets: Vec<MonthlyBuckets> = (start_year..=end_year)
        .map(|_| MonthlyBuckets::new())
        .collect();

    for order in orders {
        let year = order.created_at.year();
        if year < start_year || year > end_year {
            continue;
        }

        let index = (year - start_year) as usize;
        buckets[index].add(order.created_at.month(), order.revenue());
    }

    buckets
        .into_iter()
        .zip(start_year..=end_year)
        .map(|(bucket, year)| TrendSeries {
            name: year,
            data: bucket.into_points(),
        })
        .collect()
}
