//! Core types for the huddle backend.

use serde::{Deserialize, Serialize};

/// A registered user. Email is the unique identifier for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// `None` means no usable password (account created via invitation).
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: i64,
}

/// Task lifecycle status.
///
/// `Overdue` is a stored value that clients may set; it is never written
/// automatically. Running-over-estimate is reported through the derived
/// `overdue` field on task reads instead (see [`crate::domain`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "overdue" => Some(TaskStatus::Overdue),
            _ => None,
        }
    }
}

/// One unit of trackable work, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// ISO-8601 date, e.g. "2026-09-01".
    pub due_date: Option<String>,
    /// ISO-8601 time of day, e.g. "17:30:00".
    pub due_time: Option<String>,
    pub status: TaskStatus,
    pub category: Option<String>,
    pub tool: Option<String>,
    pub recurring: bool,
    /// Planned duration in minutes.
    pub duration: Option<i64>,
    /// Estimate in minutes, compared against elapsed timer minutes.
    pub estimated_time_for_completion: Option<i64>,
    pub workroom_id: Option<i64>,
    pub assigned_to: Option<i64>,
    /// Timer start instant (unix ms).
    pub start_time: Option<i64>,
    /// Timer stop instant (unix ms).
    pub end_time: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Task as returned by the API: the stored record plus derived timer fields.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    /// Elapsed timer minutes, absent unless both timestamps are set.
    pub time_spent: Option<f64>,
    /// Derived on read; independent of the stored `status` column.
    pub overdue: bool,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let time_spent = task.time_spent();
        let overdue = task.is_overdue();
        Self {
            task,
            time_spent,
            overdue,
        }
    }
}

/// Client-supplied fields for creating a task. Owner is never taken from
/// the body; it is forced to the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub status: Option<TaskStatus>,
    pub category: Option<String>,
    pub tool: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    pub duration: Option<i64>,
    pub estimated_time_for_completion: Option<i64>,
    pub workroom_id: Option<i64>,
    pub assigned_to: Option<i64>,
}

/// A named group of users with set-semantics membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workroom {
    pub id: i64,
    pub workroom_name: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub is_private: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Membership counts for a workroom, split by the members' active flag
/// at query time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemberCounts {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

/// Append-only feedback record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub user_id: i64,
    pub experience: String,
    pub huddle_feedback: String,
    pub feature_suggestion: String,
    pub created_at: i64,
}

/// Client-supplied feedback fields. The stored record adds the owner and
/// timestamp; the creation response echoes only these three fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponseInput {
    pub experience: String,
    pub huddle_feedback: String,
    pub feature_suggestion: String,
}
