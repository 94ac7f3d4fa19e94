//! User storage: creation and lookup keyed by email.

use super::{Database, now_ms};
use anyhow::Result;
use rusqlite::{Connection, Row, params};

use crate::types::User;

fn parse_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        is_active: row.get("is_active")?,
        is_staff: row.get("is_staff")?,
        is_superuser: row.get("is_superuser")?,
        date_joined: row.get("date_joined")?,
    })
}

/// Internal helper to get a user using an existing connection.
fn get_user_internal(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

    let result = stmt.query_row(params![user_id], parse_user_row);

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a user with no usable password (invitation flow).
    ///
    /// The insert is atomic: uniqueness is enforced by the UNIQUE constraint
    /// on email, not by a prior lookup. Returns `None` when the email is
    /// already registered, so a concurrent duplicate can never create a
    /// second account.
    pub fn create_invited_user(&self, email: &str) -> Result<Option<User>> {
        let now = now_ms();

        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO users (email, password_hash, date_joined) VALUES (?1, NULL, ?2)",
                params![email, now],
            );

            match result {
                Ok(_) => {
                    let id = conn.last_insert_rowid();
                    Ok(Some(User {
                        id,
                        email: email.to_string(),
                        password_hash: None,
                        is_active: true,
                        is_staff: false,
                        is_superuser: false,
                        date_joined: now,
                    }))
                }
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Get a user by ID.
    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| get_user_internal(conn, user_id))
    }

    /// Get a user by email (exact, case-sensitive as stored).
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?1")?;

            let result = stmt.query_row(params![email], parse_user_row);

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Flip a user's active flag. Users are never hard-deleted.
    pub fn set_user_active(&self, user_id: i64, is_active: bool) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET is_active = ?1 WHERE id = ?2",
                params![is_active, user_id],
            )?;
            Ok(changed > 0)
        })
    }
}
