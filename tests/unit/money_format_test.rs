// Unit tests for the fixed-point formatting and abbreviation helpers.

use rust_decimal_macros::dec;

use salesdesk::core::money;

#[test]
fn format_amount_is_fixed_to_two_places() {
    assert_eq!(money::format_amount(dec!(0)), "0.00");
    assert_eq!(money::format_amount(dec!(7)), "7.00");
    assert_eq!(money::format_amount(dec!(7.1)), "7.10");
    assert_eq!(money::format_amount(dec!(1234567.891)), "1234567.89");
}

#[test]
fn format_amount_rounds_midpoints_away_from_zero() {
    assert_eq!(money::format_amount(dec!(2.005)), "2.01");
    assert_eq!(money::format_amount(dec!(2.004)), "2.00");
    assert_eq!(money::format_amount(dec!(-2.005)), "-2.01");
}

#[test]
fn reported_scale_matches_rendered_value() {
    let value = dec!(10.0049);
    assert_eq!(
        money::format_amount(money::to_reported_scale(value)),
        money::format_amount(value)
    );
}

#[test]
fn abbreviate_below_one_thousand_is_plain() {
    assert_eq!(money::abbreviate(dec!(0)), "0");
    assert_eq!(money::abbreviate(dec!(100)), "100");
    assert_eq!(money::abbreviate(dec!(999.99)), "999.99");
}

#[test]
fn abbreviate_scales_by_thousands() {
    assert_eq!(money::abbreviate(dec!(1000)), "1K");
    assert_eq!(money::abbreviate(dec!(1200)), "1.2K");
    assert_eq!(money::abbreviate(dec!(1234)), "1.23K");
    assert_eq!(money::abbreviate(dec!(1234567)), "1.23M");
    assert_eq!(money::abbreviate(dec!(2000000)), "2M");
    assert_eq!(money::abbreviate(dec!(1500000000)), "1.5B");
    assert_eq!(money::abbreviate(dec!(3000000000000)), "3T");
}

#[test]
fn abbreviate_trims_trailing_zeros() {
    assert_eq!(money::abbreviate(dec!(1100)), "1.1K");
    assert_eq!(money::abbreviate(dec!(1010)), "1.01K");
    assert_eq!(money::abbreviate(dec!(10000)), "10K");
}
