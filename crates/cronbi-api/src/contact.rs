use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{error, warn};

use cronbi_db::models::ContactRow;
use cronbi_types::api::{ContactRequest, ContactSubmitResponse};
use cronbi_types::models::ContactMessage;

use crate::AppState;
use crate::error::ApiError;

/// Public endpoint — anyone may submit the contact form.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_string();
    let message = req.message.trim().to_string();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ApiError::Validation(
            "name, email and message are required",
        ));
    }

    let company = req
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let id = tokio::task::spawn_blocking(move || {
        db.db.insert_contact(&name, &email, company.as_deref(), &message)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Storage
    })?
    .map_err(|e| {
        error!("contact insert failed: {}", e);
        ApiError::Storage
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ContactSubmitResponse {
            success: true,
            message: "Your message has been sent".to_string(),
            id,
        }),
    ))
}

pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_contacts())
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Storage
        })?
        .map_err(|e| {
            error!("contact list failed: {}", e);
            ApiError::Storage
        })?;

    let contacts: Vec<ContactMessage> = rows.into_iter().map(row_to_message).collect();
    Ok(Json(contacts))
}

pub(crate) fn row_to_message(row: ContactRow) -> ContactMessage {
    let created_at = row
        .created_at
        .parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without
            // timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!(
                "Corrupt created_at '{}' on contact {}: {}",
                row.created_at, row.id, e
            );
            chrono::DateTime::default()
        });

    ContactMessage {
        id: row.id,
        name: row.name,
        email: row.email,
        company: row.company,
        message: row.message,
        created_at,
    }
}
