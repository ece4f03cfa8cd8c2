use crate::Database;
use crate::models::ContactRow;
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Contacts --

    /// Insert a contact submission and return its assigned id.
    /// `created_at` is filled in by the table default at insert time.
    pub fn insert_contact(
        &self,
        name: &str,
        email: &str,
        company: Option<&str>,
        message: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contacts (name, email, company, message) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![name, email, company, message],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All contact submissions, newest first.
    pub fn list_contacts(&self) -> Result<Vec<ContactRow>> {
        self.with_conn(query_contacts)
    }

    pub fn count_total(&self) -> Result<i64> {
        self.with_conn(query_total)
    }

    /// Submissions whose `created_at` falls on the current calendar date in
    /// the server's local time zone.
    pub fn count_today(&self) -> Result<i64> {
        self.with_conn(query_today)
    }

    /// Listing plus aggregates under a single lock acquisition, so a
    /// concurrent insert can never land between the rows and the counts.
    pub fn contacts_with_stats(&self) -> Result<(Vec<ContactRow>, i64, i64)> {
        self.with_conn(|conn| {
            let rows = query_contacts(conn)?;
            let total = query_total(conn)?;
            let today = query_today(conn)?;
            Ok((rows, total, today))
        })
    }
}

fn query_total(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
    Ok(count)
}

/// Timestamps are stored in UTC, so both sides of the calendar-date
/// comparison go through SQLite's 'localtime' modifier.
fn query_today(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM contacts
         WHERE date(created_at, 'localtime') = date('now', 'localtime')",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn query_contacts(conn: &Connection) -> Result<Vec<ContactRow>> {
    // Ties on created_at (same second) fall back to insertion order.
    let mut stmt = conn.prepare(
        "SELECT id, name, email, company, message, created_at
         FROM contacts
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ContactRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                company: row.get(3)?,
                message: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
