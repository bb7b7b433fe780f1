use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sales agent. The display name lives on the linked user record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sales {
    pub id: i64,
    pub user_id: i64,
    pub area_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sales agent joined with the user name, for responses and report labels.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesDisplay {
    pub id: i64,
    pub name: String,
}

/// Geographic area a sales agent covers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesArea {
    pub id: i64,
    pub name: String,
}
