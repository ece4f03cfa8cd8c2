use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::{error, info};

use cronbi_types::api::{LoginRequest, LoginResponse, LogoutResponse, VerifyResponse};

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::bearer_token;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.credentials.verify(&req.username, &req.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let (token, session) = state.sessions.create(&req.username).map_err(|e| {
        error!("session create failed: {}", e);
        ApiError::Storage
    })?;

    info!(user = %session.username, "admin login");

    Ok(Json(LoginResponse {
        success: true,
        token,
        message: "Login successful".to_string(),
    }))
}

pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let session = match bearer_token(&headers) {
        Some(token) => state.sessions.get(token).map_err(|e| {
            error!("session lookup failed: {}", e);
            ApiError::Storage
        })?,
        None => None,
    };

    match session {
        Some(session) => Ok((
            StatusCode::OK,
            Json(VerifyResponse {
                valid: true,
                user: Some(session),
            }),
        )),
        None => Ok((
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponse {
                valid: false,
                user: None,
            }),
        )),
    }
}

/// Idempotent: logging out with a missing or unknown token still succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.delete(token).map_err(|e| {
            error!("session delete failed: {}", e);
            ApiError::Storage
        })?;
    }

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}
