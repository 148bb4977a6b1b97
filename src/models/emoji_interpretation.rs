use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Permanent cache entry: one row per distinct emoji, created on first lookup
/// miss and never updated or expired afterwards.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct EmojiInterpretation {
    pub emoji: String,
    pub explanation: String,
    pub created_by: i64,
}
