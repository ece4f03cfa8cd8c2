use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single contact-form submission. Append-only: records are never
/// updated or deleted once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// An active admin session. The opaque token is the key into the session
/// store, not part of the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub created_at: DateTime<Utc>,
}
