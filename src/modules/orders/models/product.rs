use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog product. Order items copy its prices at order time, so later
/// price changes never rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub production_price: Decimal,
    pub selling_price: Decimal,
}
