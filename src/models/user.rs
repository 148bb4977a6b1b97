use sqlx::FromRow;
use serde::{Deserialize, Serialize};

/// Role assigned to accounts created through registration.
pub const DEFAULT_ROLE: &str = "user";

/// Fixed account that owns system-originated records (audit entries,
/// cached emoji explanations) when no acting user is known.
pub const SYSTEM_USER_ID: i64 = 1;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
