//! Workroom storage and set-semantics membership.

use super::{Database, now_ms};
use crate::types::{MemberCounts, User, Workroom};
use anyhow::Result;
use rusqlite::{Row, params};

fn parse_workroom_row(row: &Row) -> rusqlite::Result<Workroom> {
    Ok(Workroom {
        id: row.get("id")?,
        workroom_name: row.get("workroom_name")?,
        description: row.get("description")?,
        creator_id: row.get("creator_id")?,
        is_private: row.get("is_private")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Database {
    /// Create a workroom. The creator is not implicitly a member.
    pub fn create_workroom(
        &self,
        workroom_name: &str,
        description: Option<&str>,
        creator_id: i64,
        is_private: bool,
    ) -> Result<Workroom> {
        let now = now_ms();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO workrooms (workroom_name, description, creator_id, is_private, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![workroom_name, description, creator_id, is_private, now],
            )?;

            Ok(Workroom {
                id: conn.last_insert_rowid(),
                workroom_name: workroom_name.to_string(),
                description: description.map(String::from),
                creator_id,
                is_private,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// Get a workroom by ID.
    pub fn get_workroom(&self, workroom_id: i64) -> Result<Option<Workroom>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM workrooms WHERE id = ?1")?;

            let result = stmt.query_row(params![workroom_id], parse_workroom_row);

            match result {
                Ok(room) => Ok(Some(room)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Add a member. Idempotent: adding an existing member is a no-op.
    pub fn add_member(&self, workroom_id: i64, user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO workroom_members (workroom_id, user_id) VALUES (?1, ?2)",
                params![workroom_id, user_id],
            )?;
            Ok(())
        })
    }

    /// Remove a member. Idempotent: removing a non-member is a no-op.
    pub fn remove_member(&self, workroom_id: i64, user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM workroom_members WHERE workroom_id = ?1 AND user_id = ?2",
                params![workroom_id, user_id],
            )?;
            Ok(())
        })
    }

    /// List the members of a workroom.
    pub fn list_members(&self, workroom_id: i64) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.* FROM users u
                 INNER JOIN workroom_members m ON u.id = m.user_id
                 WHERE m.workroom_id = ?1
                 ORDER BY u.id",
            )?;

            let members = stmt
                .query_map(params![workroom_id], |row| {
                    Ok(User {
                        id: row.get("id")?,
                        email: row.get("email")?,
                        password_hash: row.get("password_hash")?,
                        is_active: row.get("is_active")?,
                        is_staff: row.get("is_staff")?,
                        is_superuser: row.get("is_superuser")?,
                        date_joined: row.get("date_joined")?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(members)
        })
    }

    /// Count members, split by the referenced users' active flag at query
    /// time. Nothing is cached.
    pub fn member_counts(&self, workroom_id: i64) -> Result<MemberCounts> {
        self.with_conn(|conn| {
            let (total, active): (i64, i64) = conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(u.is_active), 0)
                 FROM workroom_members m
                 INNER JOIN users u ON u.id = m.user_id
                 WHERE m.workroom_id = ?1",
                params![workroom_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;

            Ok(MemberCounts {
                total,
                active,
                inactive: total - active,
            })
        })
    }
}
