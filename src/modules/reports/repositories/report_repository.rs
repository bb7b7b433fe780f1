use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool, QueryBuilder};

use crate::core::Result;

/// One order line as the report builders consume it.
#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub quantity: i32,
    pub selling_price: Decimal,
    pub production_price: Decimal,
}

/// An order snapshot with its lines and the sales agent display name.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: i64,
    pub customer_id: i64,
    pub sales_id: i64,
    pub sales_name: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineRecord>,
}

impl OrderRecord {
    /// Total revenue: sum of quantity x selling price over the lines,
    /// unrounded.
    pub fn revenue(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| Decimal::from(line.quantity) * line.selling_price)
            .sum()
    }

    /// Total income: sum of quantity x (selling - production) over the
    /// lines, unrounded.
    pub fn income(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| {
                Decimal::from(line.quantity) * (line.selling_price - line.production_price)
            })
            .sum()
    }
}

/// A sales target row as the report builders consume it.
#[derive(Debug, Clone, FromRow)]
pub struct TargetRecord {
    pub sales_id: i64,
    pub active_date: NaiveDate,
    pub amount: Decimal,
}

/// Date range plus the optional filters the order queries push down.
#[derive(Debug, Clone)]
pub struct OrderReportFilter {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub customer_id: Option<i64>,
    pub sales_id: Option<i64>,
}

/// Date range plus the optional filters the target queries push down.
#[derive(Debug, Clone)]
pub struct TargetReportFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sales_id: Option<i64>,
    /// Restrict to these agents (the performance report narrows targets to
    /// agents that actually have orders in the period).
    pub sales_ids: Option<Vec<i64>>,
}

/// Read access to the order and target rows the reports aggregate.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Orders created inside the range, with lines, oldest id first.
    async fn orders_with_lines(&self, filter: &OrderReportFilter) -> Result<Vec<OrderRecord>>;

    /// Targets active inside the range.
    async fn targets(&self, filter: &TargetReportFilter) -> Result<Vec<TargetRecord>>;
}

pub struct MySqlReportStore {
    pool: MySqlPool,
}

impl MySqlReportStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for MySqlReportStore {
    async fn orders_with_lines(&self, filter: &OrderReportFilter) -> Result<Vec<OrderRecord>> {
        #[derive(FromRow)]
        struct OrderRow {
            id: i64,
            customer_id: i64,
            sales_id: i64,
            sales_name: String,
            created_at: DateTime<Utc>,
        }

        let mut query = QueryBuilder::new(
            "SELECT o.id, o.customer_id, o.sales_id, u.name AS sales_name, o.created_at \
             FROM sales_orders o \
             INNER JOIN sales s ON s.id = o.sales_id \
             INNER JOIN users u ON u.id = s.user_id \
             WHERE o.created_at BETWEEN ",
        );
        query.push_bind(filter.start);
        query.push(" AND ");
        query.push_bind(filter.end);
        if let Some(customer_id) = filter.customer_id {
            query.push(" AND o.customer_id = ");
            query.push_bind(customer_id);
        }
        if let Some(sales_id) = filter.sales_id {
            query.push(" AND o.sales_id = ");
            query.push_bind(sales_id);
        }
        query.push(" ORDER BY o.id");

        let order_rows = query
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut orders: Vec<OrderRecord> = order_rows
            .into_iter()
            .map(|row| OrderRecord {
                id: row.id,
                customer_id: row.customer_id,
                sales_id: row.sales_id,
                sales_name: row.sales_name,
                created_at: row.created_at,
                lines: Vec::new(),
            })
            .collect();

        if orders.is_empty() {
            return Ok(orders);
        }

        #[derive(FromRow)]
        struct LineRow {
            order_id: i64,
            quantity: i32,
            selling_price: Decimal,
            production_price: Decimal,
        }

        let mut lines_query = QueryBuilder::new(
            "SELECT order_id, quantity, selling_price, production_price \
             FROM sales_order_items WHERE order_id IN (",
        );
        let mut separated = lines_query.separated(", ");
        for order in &orders {
            separated.push_bind(order.id);
        }
        lines_query.push(") ORDER BY id");

        let line_rows = lines_query
            .build_query_as::<LineRow>()
            .fetch_all(&self.pool)
            .await?;

        let index: HashMap<i64, usize> = orders
            .iter()
            .enumerate()
            .map(|(position, order)| (order.id, position))
            .collect();

        for line in line_rows {
            if let Some(&position) = index.get(&line.order_id) {
                orders[position].lines.push(OrderLineRecord {
                    quantity: line.quantity,
                    selling_price: line.selling_price,
                    production_price: line.production_price,
                });
            }
        }

        Ok(orders)
    }

    async fn targets(&self, filter: &TargetReportFilter) -> Result<Vec<TargetRecord>> {
        if let Some(sales_ids) = &filter.sales_ids {
            if sales_ids.is_empty() {
                return Ok(Vec::new());
            }
        }

        let mut query = QueryBuilder::new(
            "SELECT sales_id, active_date, amount FROM sales_targets WHERE active_date BETWEEN ",
        );
        query.push_bind(filter.start);
        query.push(" AND ");
        query.push_bind(filter.end);
        if let Some(sales_id) = filter.sales_id {
            query.push(" AND sales_id = ");
            query.push_bind(sales_id);
        }
        if let Some(sales_ids) = &filter.sales_ids {
            query.push(" AND sales_id IN (");
            let mut separated = query.separated(", ");
            for sales_id in sales_ids {
                separated.push_bind(*sales_id);
            }
            query.push(")");
        }
        query.push(" ORDER BY id");

        let targets = query
            .build_query_as::<TargetRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(targets)
    }
}
