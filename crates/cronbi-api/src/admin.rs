use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::{debug, error};

use cronbi_types::api::{AdminMessagesResponse, ContactStats};
use cronbi_types::models::{ContactMessage, Session};

use crate::AppState;
use crate::contact::row_to_message;
use crate::error::ApiError;

/// Admin dashboard view: all submissions newest first, plus aggregate
/// counts. Only reachable through `require_session`.
pub async fn admin_messages(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(user = %session.username, "admin message listing");

    // Single lock acquisition: the counts always describe the listed rows.
    let db = state.clone();
    let (rows, total, today) = tokio::task::spawn_blocking(move || db.db.contacts_with_stats())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Storage
        })?
        .map_err(|e| {
            error!("admin message query failed: {}", e);
            ApiError::Storage
        })?;

    let contacts: Vec<ContactMessage> = rows.into_iter().map(row_to_message).collect();

    Ok(Json(AdminMessagesResponse {
        contacts,
        stats: ContactStats { total, today },
    }))
}
