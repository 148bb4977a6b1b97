use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Log creation request and response
#[derive(Deserialize)]
pub struct LogRequestBody {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub payload: Value,
}

#[derive(Serialize)]
pub struct LogResponse {
    pub success: bool,
    pub message: String,
}


// Log retrieval filter and response
#[derive(Deserialize)]
pub struct FetchLogsQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub operation_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub details: Option<String>,
}

#[derive(Serialize)]
pub struct LogRetrievalResponse {
    pub logs: Vec<LogEntry>,
}


// Log deletion response
#[derive(Serialize)]
pub struct DeleteLogResponse {
    pub success: bool,
    pub message: String,
}
