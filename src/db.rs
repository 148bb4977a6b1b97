use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Schema for the four record kinds. Timestamps are stored as sqlx-encoded
/// `DateTime<Utc>` text, which sorts chronologically, so range filters can
/// compare in SQL. The primary key on `emoji_interpretations.emoji` is the
/// uniqueness constraint the concurrent lookup-or-create flow relies on.
const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user'
    )";

const CREATE_SESSIONS: &str = "
    CREATE TABLE IF NOT EXISTS sessions (
        session_id TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        expires_at TEXT NOT NULL
    )";

const CREATE_LOGS: &str = "
    CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        action TEXT NOT NULL,
        created_at TEXT NOT NULL,
        user_id INTEGER NOT NULL,
        details TEXT
    )";

const CREATE_EMOJI_INTERPRETATIONS: &str = "
    CREATE TABLE IF NOT EXISTS emoji_interpretations (
        emoji TEXT PRIMARY KEY,
        explanation TEXT NOT NULL,
        created_by INTEGER NOT NULL
    )";

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_SESSIONS).execute(pool).await?;
    sqlx::query(CREATE_LOGS).execute(pool).await?;
    sqlx::query(CREATE_EMOJI_INTERPRETATIONS).execute(pool).await?;
    Ok(())
}

/// True when an insert or update lost to a UNIQUE/PRIMARY KEY constraint.
/// Callers treat this as "another request wrote the row first".
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    #[actix_web::test]
    async fn init_schema_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
    }

    #[actix_web::test]
    async fn duplicate_cache_key_is_a_unique_violation() {
        let pool = memory_pool().await;

        let insert =
            "INSERT INTO emoji_interpretations (emoji, explanation, created_by) VALUES (?, ?, ?)";
        sqlx::query(insert)
            .bind("🦀")
            .bind("a crab")
            .bind(1_i64)
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query(insert)
            .bind("🦀")
            .bind("another crab")
            .bind(1_i64)
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[actix_web::test]
    async fn duplicate_email_is_a_unique_violation() {
        let pool = memory_pool().await;

        let insert =
            "INSERT INTO users (username, email, password_hash, role) VALUES (?, ?, ?, ?)";
        sqlx::query(insert)
            .bind("amy")
            .bind("amy@example.com")
            .bind("hash")
            .bind("user")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query(insert)
            .bind("amy2")
            .bind("amy@example.com")
            .bind("hash")
            .bind("user")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(is_unique_violation(&err));
    }
}
