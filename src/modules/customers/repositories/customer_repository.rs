use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{MySqlPool, QueryBuilder};

use crate::core::cache::Cache;
use crate::core::pagination::{Page, PageRequest};
use crate::core::Result;
use crate::modules::customers::models::{Customer, CustomerChanges, NewCustomer};

/// Lookup results stay cached for a minute; writes drop the affected key.
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Repository for customer CRUD operations.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List customers, optionally narrowed by a name search.
    async fn index(&self, search: Option<&str>, page: PageRequest) -> Result<Page<Customer>>;

    /// Find a customer by id. None when unknown.
    async fn show(&self, id: i64) -> Result<Option<Customer>>;

    async fn store(&self, data: NewCustomer) -> Result<Customer>;

    /// Apply partial changes. None when the customer does not exist.
    async fn update(&self, id: i64, data: CustomerChanges) -> Result<Option<Customer>>;

    /// Delete a customer. False when the customer does not exist.
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct MySqlCustomerRepository {
    pool: MySqlPool,
    cache: Arc<dyn Cache>,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool, cache: Arc<dyn Cache>) -> Self {
        Self { pool, cache }
    }

    fn show_key(id: i64) -> String {
        format!("customers:{id}")
    }

    fn index_key(search: Option<&str>, page: PageRequest) -> String {
        format!(
            "customers:index|search={}|perPage={}|page={}",
            search.unwrap_or(""),
            page.per_page,
            page.page
        )
    }

    async fn fetch(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone, created_at, updated_at FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn index(&self, search: Option<&str>, page: PageRequest) -> Result<Page<Customer>> {
        let key = Self::index_key(search, page);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(serde_json::from_value(hit)?);
        }

        let mut query = QueryBuilder::new(
            "SELECT id, name, address, phone, created_at, updated_at FROM customers",
        );
        if let Some(term) = search {
            query.push(" WHERE name LIKE ");
            query.push_bind(format!("%{term}%"));
        }
        query.push(" ORDER BY id LIMIT ");
        query.push_bind(page.fetch_limit());
        query.push(" OFFSET ");
        query.push_bind(page.offset());

        let rows = query
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        let result = Page::from_rows(rows, page);
        self.cache
            .put(&key, serde_json::to_value(&result)?, CACHE_TTL)
            .await;

        Ok(result)
    }

    async fn show(&self, id: i64) -> Result<Option<Customer>> {
        let key = Self::show_key(id);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(serde_json::from_value(hit)?);
        }

        let customer = self.fetch(id).await?;
        if let Some(found) = &customer {
            self.cache
                .put(&key, serde_json::to_value(found)?, CACHE_TTL)
                .await;
        }

        Ok(customer)
    }

    async fn store(&self, data: NewCustomer) -> Result<Customer> {
        let result =
            sqlx::query("INSERT INTO customers (name, address, phone) VALUES (?, ?, ?)")
                .bind(&data.name)
                .bind(&data.address)
                .bind(&data.phone)
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_id() as i64;
        let customer = self
            .fetch(id)
            .await?
            .ok_or_else(|| crate::core::AppError::internal("Created customer vanished"))?;

        Ok(customer)
    }

    async fn update(&self, id: i64, data: CustomerChanges) -> Result<Option<Customer>> {
        let Some(_existing) = self.fetch(id).await? else {
            return Ok(None);
        };

        if !data.is_empty() {
            let mut query = QueryBuilder::new("UPDATE customers SET updated_at = CURRENT_TIMESTAMP");
            if let Some(name) = &data.name {
                query.push(", name = ");
                query.push_bind(name);
            }
            if let Some(address) = &data.address {
                query.push(", address = ");
                query.push_bind(address);
            }
            if let Some(phone) = &data.phone {
                query.push(", phone = ");
                query.push_bind(phone);
            }
            query.push(" WHERE id = ");
            query.push_bind(id);

            query.build().execute(&self.pool).await?;
        }

        self.cache.forget(&Self::show_key(id)).await;

        self.fetch(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.cache.forget(&Self::show_key(id)).await;

        Ok(result.rows_affected() > 0)
    }
}
