//! Task CRUD and timer operations, always scoped to the owning user.

use super::{Database, now_ms};
use crate::types::{Task, TaskInput, TaskStatus};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, Row, params};

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let status: String = row.get("status")?;

    Ok(Task {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
        due_time: row.get("due_time")?,
        status: TaskStatus::from_str(&status).unwrap_or_default(),
        category: row.get("category")?,
        tool: row.get("tool")?,
        recurring: row.get("recurring")?,
        duration: row.get("duration")?,
        estimated_time_for_completion: row.get("estimated_time_for_completion")?,
        workroom_id: row.get("workroom_id")?,
        assigned_to: row.get("assigned_to")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Internal helper to get an owner's task using an existing connection.
fn get_owned_task_internal(conn: &Connection, task_id: i64, user_id: i64) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1 AND user_id = ?2")?;

    let result = stmt.query_row(params![task_id, user_id], parse_task_row);

    match result {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a task owned by the given user.
    pub fn create_task(&self, user_id: i64, input: TaskInput) -> Result<Task> {
        let now = now_ms();
        let status = input.status.unwrap_or_default();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (
                    user_id, title, description, due_date, due_time, status,
                    category, tool, recurring, duration, estimated_time_for_completion,
                    workroom_id, assigned_to, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    user_id,
                    &input.title,
                    &input.description,
                    &input.due_date,
                    &input.due_time,
                    status.as_str(),
                    &input.category,
                    &input.tool,
                    input.recurring,
                    input.duration,
                    input.estimated_time_for_completion,
                    input.workroom_id,
                    input.assigned_to,
                    now,
                    now,
                ],
            )?;

            let id = conn.last_insert_rowid();

            Ok(Task {
                id,
                user_id,
                title: input.title,
                description: input.description,
                due_date: input.due_date,
                due_time: input.due_time,
                status,
                category: input.category,
                tool: input.tool,
                recurring: input.recurring,
                duration: input.duration,
                estimated_time_for_completion: input.estimated_time_for_completion,
                workroom_id: input.workroom_id,
                assigned_to: input.assigned_to,
                start_time: None,
                end_time: None,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// Get a task by ID, visible only to its owner.
    pub fn get_task(&self, task_id: i64, user_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_owned_task_internal(conn, task_id, user_id))
    }

    /// List the owner's tasks in insertion order.
    pub fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT * FROM tasks WHERE user_id = ?1 ORDER BY id ASC")?;

            let tasks = stmt
                .query_map(params![user_id], parse_task_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(tasks)
        })
    }

    /// Set the task's timer start instant to now.
    ///
    /// Unconditional: a task that is already running simply gets a fresh
    /// start instant, discarding the old one.
    pub fn start_timer(&self, task_id: i64, user_id: i64) -> Result<Option<Task>> {
        let now = now_ms();

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET start_time = ?1, updated_at = ?1
                 WHERE id = ?2 AND user_id = ?3",
                params![now, task_id, user_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            get_owned_task_internal(conn, task_id, user_id)
        })
    }

    /// Set the task's timer stop instant to now.
    ///
    /// No precondition that the timer was started; elapsed time simply
    /// stays unknown until both instants exist.
    pub fn stop_timer(&self, task_id: i64, user_id: i64) -> Result<Option<Task>> {
        let now = now_ms();

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET end_time = ?1, updated_at = ?1
                 WHERE id = ?2 AND user_id = ?3",
                params![now, task_id, user_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            get_owned_task_internal(conn, task_id, user_id)
        })
    }

    /// Update the stored status of an owned task.
    pub fn set_task_status(&self, task_id: i64, user_id: i64, status: TaskStatus) -> Result<Task> {
        let now = now_ms();

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2
                 WHERE id = ?3 AND user_id = ?4",
                params![status.as_str(), now, task_id, user_id],
            )?;
            if changed == 0 {
                return Err(anyhow!("Task not found: {}", task_id));
            }
            get_owned_task_internal(conn, task_id, user_id)?
                .ok_or_else(|| anyhow!("Task not found: {}", task_id))
        })
    }
}
