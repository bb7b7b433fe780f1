use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::product::Product;

/// A sales order placed by a customer through a sales agent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub reference_no: String,
    pub customer_id: i64,
    pub sales_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Line items, joined from the order items table.
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One order line. Prices are the product's prices at order time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub production_price: Decimal,
    pub selling_price: Decimal,
}

/// Validated payload for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub reference_no: String,
    pub customer_id: i64,
    pub sales_id: i64,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Validated partial payload for updating an order. Items, when present,
/// replace the existing set (upsert by product, delete the rest).
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub reference_no: Option<String>,
    pub customer_id: Option<i64>,
    pub sales_id: Option<i64>,
    pub items: Option<Vec<NewOrderItem>>,
}

/// Customer or sales agent reference embedded in an order detail.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderParty {
    pub id: i64,
    pub name: String,
}

/// Fully resolved order for the show endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub reference_no: String,
    pub customer: OrderParty,
    pub sales: OrderParty,
    pub items: Vec<OrderDetailItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailItem {
    pub quantity: i32,
    pub product: Product,
}
