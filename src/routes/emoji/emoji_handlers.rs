use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use log::info;
use chrono::Utc;
use crate::db::is_unique_violation;
use crate::error::ApiError;
use crate::models::emoji_interpretation::EmojiInterpretation;
use crate::models::user::SYSTEM_USER_ID;
use crate::provider::ExplanationProvider;
use super::emoji_models::{
    InterpretRequest, InterpretResponse,
    ExplainRequest, ExplainResponse,
};

const NO_EXPLANATION: &str = "No explanation found";

async fn find_interpretation(
    pool: &SqlitePool,
    emoji: &str,
) -> Result<Option<EmojiInterpretation>, sqlx::Error> {
    sqlx::query_as::<_, EmojiInterpretation>(
        "SELECT * FROM emoji_interpretations WHERE emoji = ?",
    )
    .bind(emoji)
    .fetch_optional(pool)
    .await
}

/// Outcome of writing a new cache entry.
enum StoredExplanation {
    /// Our insert won; the text is the one we produced.
    Fresh(String),
    /// A concurrent request populated the cache first; the text is theirs.
    Existing(String),
}

async fn store_interpretation(
    pool: &SqlitePool,
    emoji: &str,
    explanation: String,
) -> Result<StoredExplanation, ApiError> {
    let result = sqlx::query(
        "INSERT INTO emoji_interpretations (emoji, explanation, created_by) VALUES (?, ?, ?)",
    )
    .bind(emoji)
    .bind(&explanation)
    .bind(SYSTEM_USER_ID)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(StoredExplanation::Fresh(explanation)),
        // Someone else populated the cache between our miss and our insert;
        // their entry wins
        Err(e) if is_unique_violation(&e) => {
            let winner = find_interpretation(pool, emoji).await?.ok_or_else(|| {
                ApiError::Internal(format!("cache entry for {} vanished after conflict", emoji))
            })?;
            Ok(StoredExplanation::Existing(winner.explanation))
        }
        Err(e) => Err(e.into()),
    }
}

// interpret emoji from the cache, fabricating an entry on miss
pub async fn interpret_emoji(
    pool: web::Data<SqlitePool>,
    req: web::Json<InterpretRequest>,
) -> Result<HttpResponse, ApiError> {
    let emoji = &req.emoji;
    info!("Received request to interpret emoji: {}", emoji);

    // 1. Serve from the cache when the emoji is already known
    if let Some(cached) = find_interpretation(pool.get_ref(), emoji).await? {
        info!("Cache hit for emoji: {}", emoji);
        return Ok(HttpResponse::Ok().json(InterpretResponse {
            explanation: cached.explanation,
        }));
    }

    // 2. Fabricate an interpretation and cache it
    let explanation = format!("Fictive interpretation of {}", emoji);
    let stored = store_interpretation(pool.get_ref(), emoji, explanation).await?;

    let explanation = match stored {
        StoredExplanation::Fresh(text) => {
            // 3. Record the interpretation in the log table
            sqlx::query(
                "INSERT INTO logs (action, created_at, user_id, details) VALUES (?, ?, ?, ?)",
            )
            .bind(format!("Interpreted emoji: {}", emoji))
            .bind(Utc::now())
            .bind(SYSTEM_USER_ID)
            .bind(Option::<String>::None)
            .execute(pool.get_ref())
            .await?;
            info!("Cached new interpretation for emoji: {}", emoji);
            text
        }
        // A lost race is a late cache hit, so nothing is logged
        StoredExplanation::Existing(text) => {
            info!("Emoji {} was cached concurrently", emoji);
            text
        }
    };

    Ok(HttpResponse::Ok().json(InterpretResponse { explanation }))
}

// explain emoji from the cache, asking the provider on miss
pub async fn explain_emoji(
    pool: web::Data<SqlitePool>,
    provider: web::Data<ExplanationProvider>,
    req: web::Json<ExplainRequest>,
) -> Result<HttpResponse, ApiError> {
    let emoji = &req.emoji;
    info!("Received request to explain emoji: {}", emoji);

    // 1. Serve from the cache when the emoji is already known
    if let Some(cached) = find_interpretation(pool.get_ref(), emoji).await? {
        info!("Cache hit for emoji: {}", emoji);
        return Ok(HttpResponse::Ok().json(ExplainResponse {
            emoji: cached.emoji,
            explanation: cached.explanation,
        }));
    }

    // 2. Ask the external provider
    let fetched = provider.fetch_explanation(emoji).await?;

    let explanation = match fetched {
        Some(text) => match store_interpretation(pool.get_ref(), emoji, text).await? {
            StoredExplanation::Fresh(text) => {
                info!("Cached provider explanation for emoji: {}", emoji);
                text
            }
            StoredExplanation::Existing(text) => {
                info!("Emoji {} was cached concurrently", emoji);
                text
            }
        },
        // The provider had nothing; report the sentinel without caching it
        None => {
            info!("Provider had no explanation for emoji: {}", emoji);
            NO_EXPLANATION.to_string()
        }
    };

    Ok(HttpResponse::Ok().json(ExplainResponse {
        emoji: emoji.clone(),
        explanation,
    }))
}
