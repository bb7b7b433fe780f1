// Unit tests for the performance statistic builder: grouping by agent,
// percentage math, the underperform filter and descending stable ordering.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use salesdesk::modules::reports::repositories::{OrderLineRecord, OrderRecord, TargetRecord};
use salesdesk::modules::reports::services::performance_statistic;

fn order(id: i64, sales_id: i64, sales_name: &str, revenue: Decimal) -> OrderRecord {
    OrderRecord {
        id,
        customer_id: 1,
        sales_id,
        sales_name: sales_name.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
        lines: vec![OrderLineRecord {
            quantity: 1,
            selling_price: revenue,
            production_price: Decimal::ZERO,
        }],
    }
}

fn target(sales_id: i64, amount: Decimal) -> TargetRecord {
    TargetRecord {
        sales_id,
        active_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        amount,
    }
}

#[test]
fn ranks_agents_by_percentage_descending() {
    // Agent A: 1000 / 500 = 200.00%. Agent B: 100 / 1000 = 10.00%.
    let orders = vec![
        order(1, 2, "B", dec!(100.00)),
        order(2, 1, "A", dec!(1000.00)),
    ];
    let targets = vec![target(1, dec!(500.00)), target(2, dec!(1000.00))];

    let items = performance_statistic::build(&orders, &targets, None);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].sales, "A");
    assert_eq!(items[0].percentage, "200.00");
    assert_eq!(items[1].sales, "B");
    assert_eq!(items[1].percentage, "10.00");
}

#[test]
fn underperform_filter_keeps_only_agents_below_target() {
    let orders = vec![
        order(1, 1, "A", dec!(1000.00)),
        order(2, 2, "B", dec!(100.00)),
    ];
    let targets = vec![target(1, dec!(500.00)), target(2, dec!(1000.00))];

    let under = performance_statistic::build(&orders, &targets, Some(true));
    assert_eq!(under.len(), 1);
    assert_eq!(under[0].sales, "B");

    let over = performance_statistic::build(&orders, &targets, Some(false));
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].sales, "A");
}

#[test]
fn zero_target_yields_zero_percentage_not_an_error() {
    let orders = vec![order(1, 1, "A", dec!(750.00))];

    let items = performance_statistic::build(&orders, &[], None);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].target.amount, "0.00");
    assert_eq!(items[0].percentage, "0.00");
}

#[test]
fn zero_target_with_revenue_counts_as_meeting_target() {
    // revenue >= target holds when the target is zero, so the agent only
    // shows up when is_underperform is false or absent.
    let orders = vec![order(1, 1, "A", dec!(750.00))];

    assert!(performance_statistic::build(&orders, &[], Some(true)).is_empty());
    assert_eq!(performance_statistic::build(&orders, &[], Some(false)).len(), 1);
}

#[test]
fn comparison_is_numeric_across_digit_counts() {
    // "999.99" < "1000.00" numerically, even though a lexicographic
    // comparison of the rendered strings would say otherwise.
    let orders = vec![order(1, 1, "A", dec!(999.99))];
    let targets = vec![target(1, dec!(1000.00))];

    let under = performance_statistic::build(&orders, &targets, Some(true));
    assert_eq!(under.len(), 1);
    assert_eq!(under[0].revenue.amount, "999.99");
    assert_eq!(under[0].target.amount, "1000.00");
}

#[test]
fn revenue_across_orders_accumulates_per_agent() {
    let orders = vec![
        order(1, 1, "A", dec!(300.00)),
        order(2, 1, "A", dec!(200.00)),
    ];
    let targets = vec![target(1, dec!(1000.00))];

    let items = performance_statistic::build(&orders, &targets, None);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].revenue.amount, "500.00");
    assert_eq!(items[0].percentage, "50.00");
}

#[test]
fn split_targets_accumulate_per_agent() {
    let orders = vec![order(1, 1, "A", dec!(600.00))];
    let targets = vec![target(1, dec!(400.00)), target(1, dec!(200.00))];

    let items = performance_statistic::build(&orders, &targets, None);

    assert_eq!(items[0].target.amount, "600.00");
    assert_eq!(items[0].percentage, "100.00");
}

#[test]
fn equal_percentages_keep_first_seen_order() {
    let orders = vec![
        order(1, 1, "First", dec!(100.00)),
        order(2, 2, "Second", dec!(100.00)),
    ];
    let targets = vec![target(1, dec!(200.00)), target(2, dec!(200.00))];

    let items = performance_statistic::build(&orders, &targets, None);

    assert_eq!(items[0].sales, "First");
    assert_eq!(items[1].sales, "Second");
}

#[test]
fn amounts_carry_abbreviations() {
    let orders = vec![order(1, 1, "A", dec!(1200.00))];
    let targets = vec![target(1, dec!(2000000.00))];

    let items = performance_statistic::build(&orders, &targets, None);

    assert_eq!(items[0].revenue.amount, "1200.00");
    assert_eq!(items[0].revenue.abbreviation, "1.2K");
    assert_eq!(items[0].target.abbreviation, "2M");
}
