use serde::{Deserialize, Serialize};

use crate::models::{ContactMessage, Session};

// -- Auth --

/// Missing fields deserialize as empty strings so a malformed login
/// still gets the uniform 401 instead of a serde-level reject.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Session>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// -- Contact --

/// Missing required fields deserialize as empty strings and are caught
/// by handler validation, keeping the failure a consistent 400.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactSubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

// -- Admin --

#[derive(Debug, Serialize)]
pub struct ContactStats {
    pub total: i64,
    pub today: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminMessagesResponse {
    pub contacts: Vec<ContactMessage>,
    pub stats: ContactStats,
}

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
