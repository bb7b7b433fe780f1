use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};

use crate::core::cache::Cache;
use crate::core::pagination::{Page, PageRequest};
use crate::core::validation::ValidationErrors;
use crate::core::{AppError, Result};
use crate::modules::orders::models::{
    NewOrder, NewOrderItem, Order, OrderChanges, OrderDetail, OrderDetailItem, OrderItem,
    OrderParty, Product,
};

const CACHE_TTL: Duration = Duration::from_secs(60);

/// Optional equality filters for the order list endpoint.
#[derive(Debug, Clone, Default)]
pub struct OrderIndexFilter {
    pub reference_no: Option<String>,
    pub sales_id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// Repository for order CRUD operations.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn index(&self, filter: &OrderIndexFilter, page: PageRequest) -> Result<Page<Order>>;

    /// Find an order with items, customer and sales names resolved.
    async fn show(&self, id: i64) -> Result<Option<OrderDetail>>;

    async fn store(&self, data: NewOrder) -> Result<Order>;

    async fn update(&self, id: i64, data: OrderChanges) -> Result<Option<Order>>;

    async fn delete(&self, id: i64) -> Result<bool>;

    /// Look up products by id, for item validation and price snapshots.
    async fn find_products(&self, ids: &[i64]) -> Result<Vec<Product>>;
}

pub struct MySqlOrderRepository {
    pool: MySqlPool,
    cache: Arc<dyn Cache>,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool, cache: Arc<dyn Cache>) -> Self {
        Self { pool, cache }
    }

    fn show_key(id: i64) -> String {
        format!("orders:{id}")
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, reference_no, customer_id, sales_id, created_at, updated_at \
             FROM sales_orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn fetch_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, quantity, production_price, selling_price \
             FROM sales_order_items WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn with_items(&self, order: Order) -> Result<Order> {
        let items = self.fetch_items(order.id).await?;
        Ok(Order { items, ..order })
    }

    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        order_id: i64,
        items: &[NewOrderItem],
        products: &HashMap<i64, Product>,
    ) -> Result<()> {
        for item in items {
            let Some(product) = products.get(&item.product_id) else {
                continue;
            };

            sqlx::query(
                "INSERT INTO sales_order_items \
                 (order_id, product_id, quantity, production_price, selling_price) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON DUPLICATE KEY UPDATE \
                 quantity = VALUES(quantity), \
                 production_price = VALUES(production_price), \
                 selling_price = VALUES(selling_price)",
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(product.production_price)
            .bind(product.selling_price)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    fn map_unique_reference(err: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let mut errors = ValidationErrors::new();
                errors.add("reference_no", "The reference no has already been taken.");
                return AppError::Validation(errors);
            }
        }
        AppError::Database(err)
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn index(&self, filter: &OrderIndexFilter, page: PageRequest) -> Result<Page<Order>> {
        let mut query = QueryBuilder::new(
            "SELECT id, reference_no, customer_id, sales_id, created_at, updated_at \
             FROM sales_orders WHERE 1 = 1",
        );
        if let Some(reference_no) = &filter.reference_no {
            query.push(" AND reference_no = ");
            query.push_bind(reference_no);
        }
        if let Some(sales_id) = filter.sales_id {
            query.push(" AND sales_id = ");
            query.push_bind(sales_id);
        }
        if let Some(customer_id) = filter.customer_id {
            query.push(" AND customer_id = ");
            query.push_bind(customer_id);
        }
        query.push(" ORDER BY id LIMIT ");
        query.push_bind(page.fetch_limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let rows = query.build_query_as::<Order>().fetch_all(&self.pool).await?;

        Ok(Page::from_rows(rows, page))
    }

    async fn show(&self, id: i64) -> Result<Option<OrderDetail>> {
        let key = Self::show_key(id);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(serde_json::from_value(hit)?);
        }

        #[derive(sqlx::FromRow)]
        struct DetailRow {
            id: i64,
            reference_no: String,
            customer_id: i64,
            customer_name: String,
            sales_id: i64,
            sales_name: String,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, DetailRow>(
            r#"
            SELECT o.id, o.reference_no,
                   c.id AS customer_id, c.name AS customer_name,
                   s.id AS sales_id, u.name AS sales_name,
                   o.created_at, o.updated_at
            FROM sales_orders o
            INNER JOIN customers c ON c.id = o.customer_id
            INNER JOIN sales s ON s.id = o.sales_id
            INNER JOIN users u ON u.id = s.user_id
            WHERE o.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        #[derive(sqlx::FromRow)]
        struct ItemRow {
            quantity: i32,
            product_id: i64,
            product_name: String,
            production_price: rust_decimal::Decimal,
            selling_price: rust_decimal::Decimal,
        }

        let items = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT i.quantity,
                   p.id AS product_id, p.name AS product_name,
                   p.production_price, p.selling_price
            FROM sales_order_items i
            INNER JOIN products p ON p.id = i.product_id
            WHERE i.order_id = ?
            ORDER BY i.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let detail = OrderDetail {
            id: row.id,
            reference_no: row.reference_no,
            customer: OrderParty {
                id: row.customer_id,
                name: row.customer_name,
            },
            sales: OrderParty {
                id: row.sales_id,
                name: row.sales_name,
            },
            items: items
                .into_iter()
                .map(|item| OrderDetailItem {
                    quantity: item.quantity,
                    product: Product {
                        id: item.product_id,
                        name: item.product_name,
                        production_price: item.production_price,
                        selling_price: item.selling_price,
                    },
                })
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        self.cache
            .put(&key, serde_json::to_value(&detail)?, CACHE_TTL)
            .await;

        Ok(Some(detail))
    }

    async fn store(&self, data: NewOrder) -> Result<Order> {
        let product_ids: Vec<i64> = data.items.iter().map(|item| item.product_id).collect();
        let products: HashMap<i64, Product> = self
            .find_products(&product_ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO sales_orders (reference_no, customer_id, sales_id) VALUES (?, ?, ?)",
        )
        .bind(&data.reference_no)
        .bind(data.customer_id)
        .bind(data.sales_id)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_unique_reference)?;

        let order_id = result.last_insert_id() as i64;
        Self::insert_items(&mut tx, order_id, &data.items, &products).await?;

        tx.commit().await?;

        let order = self
            .fetch_order(order_id)
            .await?
            .ok_or_else(|| AppError::internal("Created order vanished"))?;

        self.with_items(order).await
    }

    async fn update(&self, id: i64, data: OrderChanges) -> Result<Option<Order>> {
        let Some(_existing) = self.fetch_order(id).await? else {
            return Ok(None);
        };

        let products: HashMap<i64, Product> = match &data.items {
            Some(items) => {
                let ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
                self.find_products(&ids)
                    .await?
                    .into_iter()
                    .map(|product| (product.id, product))
                    .collect()
            }
            None => HashMap::new(),
        };

        let mut tx = self.pool.begin().await?;

        let has_field_changes = data.reference_no.is_some()
            || data.customer_id.is_some()
            || data.sales_id.is_some();
        if has_field_changes {
            let mut query =
                QueryBuilder::new("UPDATE sales_orders SET updated_at = CURRENT_TIMESTAMP");
            if let Some(reference_no) = &data.reference_no {
                query.push(", reference_no = ");
                query.push_bind(reference_no);
            }
            if let Some(customer_id) = data.customer_id {
                query.push(", customer_id = ");
                query.push_bind(customer_id);
            }
            if let Some(sales_id) = data.sales_id {
                query.push(", sales_id = ");
                query.push_bind(sales_id);
            }
            query.push(" WHERE id = ");
            query.push_bind(id);

            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(Self::map_unique_reference)?;
        }

        if let Some(items) = &data.items {
            Self::insert_items(&mut tx, id, items, &products).await?;

            // Items absent from the new set are removed.
            let mut delete = QueryBuilder::new("DELETE FROM sales_order_items WHERE order_id = ");
            delete.push_bind(id);
            if !items.is_empty() {
                delete.push(" AND product_id NOT IN (");
                let mut separated = delete.separated(", ");
                for item in items {
                    separated.push_bind(item.product_id);
                }
                delete.push(")");
            }
            delete.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        self.cache.forget(&Self::show_key(id)).await;

        match self.fetch_order(id).await? {
            Some(order) => Ok(Some(self.with_items(order).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sales_order_items WHERE order_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM sales_orders WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.cache.forget(&Self::show_key(id)).await;

        Ok(result.rows_affected() > 0)
    }

    async fn find_products(&self, ids: &[i64]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::new(
            "SELECT id, name, production_price, selling_price FROM products WHERE id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        query.push(")");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }
}
