use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::sales::models::SalesDisplay;

/// Read access to sales agents for filter validation and name resolution.
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Find an agent with its display name. None when the id is unknown.
    async fn find_display(&self, id: i64) -> Result<Option<SalesDisplay>>;
}

pub struct MySqlSalesRepository {
    pool: MySqlPool,
}

impl MySqlSalesRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesRepository for MySqlSalesRepository {
    async fn find_display(&self, id: i64) -> Result<Option<SalesDisplay>> {
        let display = sqlx::query_as::<_, SalesDisplay>(
            r#"
            SELECT s.id, u.name
            FROM sales s
            INNER JOIN users u ON u.id = s.user_id
            WHERE s.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(display)
    }
}
