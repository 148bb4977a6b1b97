use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Registration request and response
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}


// Login request and response
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}


// Session check query and response
#[derive(Deserialize)]
pub struct CheckSessionQuery {
    pub session_token: String,
}

#[derive(Serialize)]
pub struct SessionCheckResponse {
    pub session_valid: bool,
    pub message: String,
}


// Logout query and response
#[derive(Deserialize)]
pub struct LogoutQuery {
    pub session_token: String,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
}


// Profile lookup response
#[derive(Serialize)]
pub struct UserDetails {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_details: UserDetails,
    pub session_data: Option<SessionDetails>,
}


// Update request and response
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub message: String,
}


// Account deletion response
#[derive(Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}
