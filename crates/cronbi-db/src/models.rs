/// Database row types — these map directly to SQLite rows.
/// Distinct from cronbi-types API models to keep the DB layer independent.

pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: String,
}
