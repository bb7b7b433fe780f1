use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Monthly revenue target for a sales agent. `active_date` carries the
/// month and year the target applies to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesTarget {
    pub id: i64,
    pub sales_id: i64,
    pub active_date: NaiveDate,
    pub amount: Decimal,
}
