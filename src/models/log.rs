use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Log {
    pub id: i64,
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub details: Option<String>,
}
