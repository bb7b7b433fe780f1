// Unit tests for the monthly order trend builder: fixed 12-month series
// per year, zero-filled buckets, revenue folding by creation month.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use salesdesk::modules::reports::repositories::{OrderLineRecord, OrderRecord};
use salesdesk::modules::reports::services::monthly_trend;

fn order(
    id: i64,
    year: i32,
    month: u32,
    lines: Vec<(i32, Decimal)>,
) -> OrderRecord {
    OrderRecord {
        id,
        customer_id: 1,
        sales_id: 1,
        sales_name: "Agent".to_string(),
        created_at: Utc.with_ymd_and_hms(year, month, 15, 10, 0, 0).unwrap(),
        lines: lines
            .into_iter()
            .map(|(quantity, selling_price)| OrderLineRecord {
                quantity,
                selling_price,
                production_price: Decimal::ZERO,
            })
            .collect(),
    }
}

#[test]
fn empty_window_produces_three_zero_years() {
    let series = monthly_trend::build(2023, 2025, &[]);

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].name, 2023);
    assert_eq!(series[1].name, 2024);
    assert_eq!(series[2].name, 2025);

    for year in &series {
        assert_eq!(year.data.len(), 12);
        assert_eq!(year.data[0].x, "Jan");
        assert_eq!(year.data[11].x, "Dec");
        assert!(year.data.iter().all(|point| point.y == "0.00"));
    }
}

#[test]
fn orders_fold_into_their_month_bucket() {
    // Orders only in March and July, each totaling 100.00 revenue.
    let orders = vec![
        order(1, 2025, 3, vec![(1, dec!(100.00))]),
        order(2, 2025, 7, vec![(2, dec!(50.00))]),
    ];

    let series = monthly_trend::build(2023, 2025, &orders);
    let year = &series[2];

    assert_eq!(year.name, 2025);
    assert_eq!(year.data[2].y, "100.00"); // Mar
    assert_eq!(year.data[6].y, "100.00"); // Jul
    for (index, point) in year.data.iter().enumerate() {
        if index != 2 && index != 6 {
            assert_eq!(point.y, "0.00", "month index {index} should stay zero");
        }
    }

    // The other years stay untouched.
    assert!(series[0].data.iter().all(|point| point.y == "0.00"));
    assert!(series[1].data.iter().all(|point| point.y == "0.00"));
}

#[test]
fn same_month_orders_accumulate() {
    let orders = vec![
        order(1, 2024, 5, vec![(1, dec!(10.50))]),
        order(2, 2024, 5, vec![(3, dec!(0.50))]),
    ];

    let built = monthly_trend::build(2023, 2025, &orders);
    let series = year_series(&built, 2024);
    assert_eq!(series.data[4].y, "12.00");
}

#[test]
fn revenue_is_quantity_times_selling_price_summed_over_lines() {
    let orders = vec![order(
        1,
        2025,
        1,
        vec![(3, dec!(10.50)), (2, dec!(4.25))],
    )];

    let built = monthly_trend::build(2023, 2025, &orders);
    let series = year_series(&built, 2025);
    // 3 * 10.50 + 2 * 4.25 = 40.00
    assert_eq!(series.data[0].y, "40.00");
}

#[test]
fn orders_outside_the_window_are_ignored() {
    let orders = vec![
        order(1, 2022, 6, vec![(1, dec!(999.00))]),
        order(2, 2026, 6, vec![(1, dec!(999.00))]),
    ];

    let series = monthly_trend::build(2023, 2025, &orders);
    for year in &series {
        assert!(year.data.iter().all(|point| point.y == "0.00"));
    }
}

fn year_series(
    series: &[salesdesk::modules::reports::models::TrendSeries],
    year: i32,
) -> &salesdesk::modules::reports::models::TrendSeries {
    series
        .iter()
        .find(|entry| entry.name == year)
        .expect("year series present")
}
