use actix_web::{web, HttpResponse};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use log::{error, info};
use crate::error::ApiError;
use crate::models::log::Log;
use crate::models::user::SYSTEM_USER_ID;
use super::log_models::{
    LogRequestBody, LogResponse,
    FetchLogsQuery, LogEntry, LogRetrievalResponse,
    DeleteLogResponse,
};

const LOG_REQUEST_ACTION: &str = "Log Request";

// append one log entry
pub async fn log_request(
    pool: web::Data<SqlitePool>,
    req: web::Json<LogRequestBody>,
) -> Result<HttpResponse, ApiError> {
    info!("Received log request from source: {}", req.source);

    // A numeric source is the acting user id; anything else falls back
    // to the system account
    let user_id = req.source.parse::<i64>().unwrap_or(SYSTEM_USER_ID);
    let details = req.payload.to_string();

    let result = sqlx::query(
        "INSERT INTO logs (action, created_at, user_id, details) VALUES (?, ?, ?, ?)",
    )
    .bind(LOG_REQUEST_ACTION)
    .bind(req.timestamp)
    .bind(user_id)
    .bind(&details)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(done) => {
            let log_id = done.last_insert_rowid();
            info!("Log entry {} created for user {}", log_id, user_id);
            Ok(HttpResponse::Ok().json(LogResponse {
                success: true,
                message: format!("Log entry created with ID: {}", log_id),
            }))
        }
        Err(e) => {
            error!("Failed to insert log entry: {}", e);
            Ok(HttpResponse::InternalServerError().json(LogResponse {
                success: false,
                message: format!("Failed to log request: {}", e),
            }))
        }
    }
}

// fetch log entries matching the given filters
pub async fn fetch_logs(
    pool: web::Data<SqlitePool>,
    query: web::Query<FetchLogsQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Received request to fetch logs");

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, action, created_at, user_id, details FROM logs WHERE 1=1");

    if let Some(start_date) = query.start_date {
        builder.push(" AND created_at >= ").push_bind(start_date);
    }
    if let Some(end_date) = query.end_date {
        builder.push(" AND created_at <= ").push_bind(end_date);
    }
    if let Some(source) = &query.source {
        let user_id = source
            .parse::<i64>()
            .map_err(|_| ApiError::Internal(format!("invalid source filter: {}", source)))?;
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(operation_type) = &query.operation_type {
        builder.push(" AND action = ").push_bind(operation_type.clone());
    }

    let logs = builder
        .build_query_as::<Log>()
        .fetch_all(pool.get_ref())
        .await?;

    info!("Fetched {} log entries", logs.len());
    let logs = logs
        .into_iter()
        .map(|log| LogEntry {
            id: log.id,
            action: log.action,
            created_at: log.created_at,
            user_id: log.user_id,
            details: log.details,
        })
        .collect();

    Ok(HttpResponse::Ok().json(LogRetrievalResponse { logs }))
}

// delete one log entry by id
pub async fn delete_log(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let log_id = path.into_inner();
    info!("Received request to delete log entry: {}", log_id);

    // 1. Check whether the entry exists
    let existing = sqlx::query_as::<_, Log>("SELECT * FROM logs WHERE id = ?")
        .bind(log_id)
        .fetch_optional(pool.get_ref())
        .await;

    match existing {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("No log entry found with id: {}", log_id);
            return Ok(HttpResponse::NotFound().json(DeleteLogResponse {
                success: false,
                message: "Log entry not found.".into(),
            }));
        }
        Err(e) => {
            error!("Failed to look up log entry {}: {}", log_id, e);
            return Ok(HttpResponse::InternalServerError().json(DeleteLogResponse {
                success: false,
                message: format!("Failed to delete log entry: {}", e),
            }));
        }
    }

    // 2. Delete it
    let result = sqlx::query("DELETE FROM logs WHERE id = ?")
        .bind(log_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            info!("Log entry {} deleted", log_id);
            Ok(HttpResponse::Ok().json(DeleteLogResponse {
                success: true,
                message: "Log entry successfully deleted.".into(),
            }))
        }
        Err(e) => {
            error!("Failed to delete log entry {}: {}", log_id, e);
            Ok(HttpResponse::InternalServerError().json(DeleteLogResponse {
                success: false,
                message: format!("Failed to delete log entry: {}", e),
            }))
        }
    }
}
