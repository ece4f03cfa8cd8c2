use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::AppState;
use crate::error::ApiError;

/// Pull the token out of a `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Gate for admin routes: resolves the bearer token against the session
/// store and injects the session as a request extension. The wrapped
/// handler never runs on a missing or revoked token.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::Unauthorized)?;

    let session = state
        .sessions
        .get(token)
        .map_err(|e| {
            error!("session lookup failed: {}", e);
            ApiError::Storage
        })?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
