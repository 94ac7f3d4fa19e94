//! Append-only user feedback responses. No update or delete path.

use super::{Database, now_ms};
use crate::types::{UserResponse, UserResponseInput};
use anyhow::Result;
use rusqlite::params;

impl Database {
    /// Store a feedback response owned by the given user.
    pub fn create_response(&self, user_id: i64, input: &UserResponseInput) -> Result<UserResponse> {
        let now = now_ms();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO user_responses (user_id, experience, huddle_feedback, feature_suggestion, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id,
                    &input.experience,
                    &input.huddle_feedback,
                    &input.feature_suggestion,
                    now,
                ],
            )?;

            Ok(UserResponse {
                id: conn.last_insert_rowid(),
                user_id,
                experience: input.experience.clone(),
                huddle_feedback: input.huddle_feedback.clone(),
                feature_suggestion: input.feature_suggestion.clone(),
                created_at: now,
            })
        })
    }

    /// List a user's responses in insertion order.
    pub fn list_responses(&self, user_id: i64) -> Result<Vec<UserResponse>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM user_responses WHERE user_id = ?1 ORDER BY id ASC")?;

            let responses = stmt
                .query_map(params![user_id], |row| {
                    Ok(UserResponse {
                        id: row.get("id")?,
                        user_id: row.get("user_id")?,
                        experience: row.get("experience")?,
                        huddle_feedback: row.get("huddle_feedback")?,
                        feature_suggestion: row.get("feature_suggestion")?,
                        created_at: row.get("created_at")?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(responses)
        })
    }
}
