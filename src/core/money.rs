use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed two-decimal formatting for report values ("0.00", "1234.50").
///
/// Amounts accumulate as `Decimal` and are rendered exactly once, here.
/// Midpoints round away from zero: 2.005 -> "2.01".
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Round to the two-decimal scale used for comparisons between formatted
/// amounts, without rendering to a string.
pub fn to_reported_scale(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const UNITS: [&str; 4] = ["K", "M", "B", "T"];

/// Human-readable short form scaled by thousands, at most two decimals,
/// trailing zeros trimmed: 1200 -> "1.2K", 1234 -> "1.23K", 2000000 -> "2M".
pub fn abbreviate(amount: Decimal) -> String {
    let thousand = Decimal::new(1000, 0);
    let mut scaled = amount;
    let mut unit = None;

    for name in UNITS {
        if scaled.abs() < thousand {
            break;
        }
        scaled /= thousand;
        unit = Some(name);
    }

    let rounded = scaled
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    match unit {
        Some(name) => format!("{rounded}{name}"),
        None => rounded.to_string(),
    }
}
