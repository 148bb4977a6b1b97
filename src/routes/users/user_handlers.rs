use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use log::info;
use uuid::Uuid;
use chrono::{Utc, Duration};
use bcrypt::{hash, DEFAULT_COST, verify};
use crate::db::is_unique_violation;
use crate::error::ApiError;
use crate::models::session::Session;
use crate::models::user::{User, DEFAULT_ROLE};
use super::user_models::{
    RegisterRequest, RegisterResponse,
    LoginRequest, LoginResponse,
    CheckSessionQuery, SessionCheckResponse,
    LogoutQuery, LogoutResponse,
    UserDetails, SessionDetails, UserResponse,
    UpdateUserRequest, UpdateUserResponse,
    DeleteUserResponse,
};

const SESSION_TTL_MINUTES: i64 = 30;

// register user to DB
pub async fn register(
    pool: web::Data<SqlitePool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let username = &req.username;
    let email = &req.email;
    info!("Received request to register user: {}", username);

    // 1. Reject an email that is already registered
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_some() {
        info!("Email {} is already registered", email);
        return Ok(HttpResponse::Conflict().json(RegisterResponse {
            success: false,
            message: "Email already registered.".into(),
        }));
    }

    // 2. Encrypt password with bcrypt
    let hashed_password = hash(&req.password, DEFAULT_COST)?;

    // 3. Insert username, email, hashed_password into users table
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, role) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed_password)
    .bind(DEFAULT_ROLE)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!("User {} registered successfully", username);
            Ok(HttpResponse::Ok().json(RegisterResponse {
                success: true,
                message: "User registered successfully.".into(),
            }))
        }
        // Another request claimed the email between the check and the insert
        Err(e) if is_unique_violation(&e) => {
            info!("Email {} was registered concurrently", email);
            Ok(HttpResponse::Conflict().json(RegisterResponse {
                success: false,
                message: "Email already registered.".into(),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

// login logic
pub async fn login(
    pool: web::Data<SqlitePool>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = &req.email;
    info!("Received login request for email: {}", email);

    // 1. Get the user data from the database with email
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool.get_ref())
        .await?;

    let user = match user {
        Some(user) => user,
        None => {
            info!("No user found with email: {}", email);
            return Ok(HttpResponse::Unauthorized().json(LoginResponse {
                token: None,
                error: Some("No user found with this email".into()),
            }));
        }
    };

    // 2. Validate hashed password in DB and given password
    if !verify(&req.password, &user.password_hash)? {
        info!("Invalid password for email: {}", email);
        return Ok(HttpResponse::Unauthorized().json(LoginResponse {
            token: None,
            error: Some("Invalid password".into()),
        }));
    }

    // 3. Generate a new session and hand the token back
    let session_id = Uuid::new_v4().to_string();
    let created_at = Utc::now();
    let expires_at = created_at + Duration::minutes(SESSION_TTL_MINUTES);

    sqlx::query(
        "INSERT INTO sessions (session_id, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&session_id)
    .bind(user.id)
    .bind(created_at)
    .bind(expires_at)
    .execute(pool.get_ref())
    .await?;

    info!("User {} logged in successfully", user.id);
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: Some(session_id),
        error: None,
    }))
}

// session validity check
pub async fn check_session(
    pool: web::Data<SqlitePool>,
    query: web::Query<CheckSessionQuery>,
) -> Result<HttpResponse, ApiError> {
    let token = &query.session_token;
    info!("Received session check for token: {}", token);

    let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE session_id = ?")
        .bind(token)
        .fetch_optional(pool.get_ref())
        .await?;

    let response = match session {
        None => SessionCheckResponse {
            session_valid: false,
            message: "Session not found.".into(),
        },
        Some(session) if session.is_active(Utc::now()) => SessionCheckResponse {
            session_valid: true,
            message: "Session is valid.".into(),
        },
        Some(_) => SessionCheckResponse {
            session_valid: false,
            message: "Session has expired.".into(),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

// logout logic
pub async fn logout(
    pool: web::Data<SqlitePool>,
    query: web::Query<LogoutQuery>,
) -> Result<HttpResponse, ApiError> {
    let token = &query.session_token;
    info!("Received logout request for token: {}", token);

    // 1. Check whether the session exists
    let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE session_id = ?")
        .bind(token)
        .fetch_optional(pool.get_ref())
        .await?;

    if session.is_none() {
        info!("No session found for token: {}", token);
        return Ok(HttpResponse::Ok().json(LogoutResponse {
            message: "No session found.".into(),
        }));
    }

    // 2. Expire the session in place instead of deleting the row
    let done = sqlx::query("UPDATE sessions SET expires_at = ? WHERE session_id = ?")
        .bind(Utc::now())
        .bind(token)
        .execute(pool.get_ref())
        .await?;

    if done.rows_affected() == 0 {
        info!("Session {} disappeared before it could be expired", token);
        return Ok(HttpResponse::Ok().json(LogoutResponse {
            message: "Failed to logout.".into(),
        }));
    }

    info!("Logout successful for token: {}", token);
    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logout successful.".into(),
    }))
}

// fetch user profile with the newest active session
pub async fn get_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    info!("Received request to fetch user: {}", user_id);

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool.get_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    // Newest session that has not expired yet, if any
    let session = sqlx::query_as::<_, Session>(
        "SELECT * FROM sessions WHERE user_id = ? AND expires_at > ? \
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(Utc::now())
    .fetch_optional(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        user_details: UserDetails {
            id: user.id,
            email: user.email,
            role: user.role,
        },
        session_data: session.map(|s| SessionDetails {
            session_id: s.session_id,
            created_at: s.created_at,
            expires_at: s.expires_at,
        }),
    }))
}

// update email and password
pub async fn update_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let email = &req.email;
    info!("Received request to update user: {}", user_id);

    // 1. The new email must not belong to another account
    let owner = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool.get_ref())
        .await?;

    if let Some(owner) = owner {
        if owner.id != user_id {
            info!("Email {} is already in use by user {}", email, owner.id);
            return Ok(HttpResponse::Conflict().json(UpdateUserResponse {
                success: false,
                message: "Email is already in use by another account.".into(),
            }));
        }
    }

    // 2. Re-hash the password and write both fields
    let hashed_password = hash(&req.password, DEFAULT_COST)?;

    let result = sqlx::query("UPDATE users SET email = ?, password_hash = ? WHERE id = ?")
        .bind(email)
        .bind(&hashed_password)
        .bind(user_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            info!("No user found with id: {}", user_id);
            Ok(HttpResponse::NotFound().json(UpdateUserResponse {
                success: false,
                message: "User not found.".into(),
            }))
        }
        Ok(_) => {
            info!("User {} updated successfully", user_id);
            Ok(HttpResponse::Ok().json(UpdateUserResponse {
                success: true,
                message: "User updated successfully.".into(),
            }))
        }
        // Another request claimed the email between the check and the update
        Err(e) if is_unique_violation(&e) => {
            info!("Email {} was claimed concurrently", email);
            Ok(HttpResponse::Conflict().json(UpdateUserResponse {
                success: false,
                message: "Email is already in use by another account.".into(),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

// delete account and its sessions, keeping audit logs
pub async fn delete_user(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    info!("Received request to delete user: {}", user_id);

    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_none() {
        info!("No user found with id: {}", user_id);
        return Ok(HttpResponse::NotFound().json(DeleteUserResponse {
            success: false,
            message: "User not found.".into(),
        }));
    }

    sqlx::query("DELETE FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool.get_ref())
        .await?;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool.get_ref())
        .await?;

    info!("User {} deleted", user_id);
    Ok(HttpResponse::Ok().json(DeleteUserResponse {
        success: true,
        message: "User account deleted.".into(),
    }))
}
