/// Task model and database operations
///
/// Tasks are the leaves of the work hierarchy: units of work under a story,
/// optionally assigned to one user, tracked through todo/doing/done. The
/// update path runs through [`super::lifecycle::plan_update`], which owns
/// the auto-advance and date-stamping rules.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority work_priority NOT NULL DEFAULT 'medium',
///     status work_status NOT NULL DEFAULT 'todo',
///     story_id UUID NOT NULL REFERENCES stories(id),
///     estimated_hours DOUBLE PRECISION NOT NULL CHECK (estimated_hours >= 0.5),
///     assigned_user_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     started_at TIMESTAMPTZ,
///     ended_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::lifecycle;
use super::types::{Priority, WorkStatus};

/// Minimum billable estimate in hours
pub const MIN_ESTIMATED_HOURS: f64 = 0.5;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Priority on the board
    pub priority: Priority,

    /// Board column
    pub status: WorkStatus,

    /// Owning story
    pub story_id: Uuid,

    /// Estimated effort in hours, at least 0.5
    pub estimated_hours: f64,

    /// User the task is assigned to (None if unassigned)
    pub assigned_user_id: Option<Uuid>,

    /// When work started (stamped on first assignment, never cleared)
    pub started_at: Option<DateTime<Utc>>,

    /// When work finished (stamped on first done, never cleared)
    pub ended_at: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Status always starts at todo, even when an assignee is given; the
/// auto-advance rule only applies to updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Priority on the board
    pub priority: Priority,

    /// Owning story (must exist)
    pub story_id: Uuid,

    /// Estimated effort in hours, at least 0.5
    pub estimated_hours: f64,

    /// Optional initial assignee (must exist)
    pub assigned_user_id: Option<Uuid>,
}

/// Input for updating an existing task
///
/// All fields are optional. Setting `assigned_user_id` on a todo task
/// triggers the doing auto-advance; see [`super::lifecycle`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New task name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<Priority>,

    /// New board column
    pub status: Option<WorkStatus>,

    /// New estimate in hours
    pub estimated_hours: Option<f64>,

    /// Assign the task to a user (must exist)
    pub assigned_user_id: Option<Uuid>,
}

impl Task {
    /// Creates a new task in todo status
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, description, priority, story_id, estimated_hours, assigned_user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, priority, status, story_id, estimated_hours,
                      assigned_user_id, started_at, ended_at, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.story_id)
        .bind(data.estimated_hours)
        .bind(data.assigned_user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, status, story_id, estimated_hours,
                   assigned_user_id, started_at, ended_at, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, status, story_id, estimated_hours,
                   assigned_user_id, started_at, ended_at, created_at, updated_at
            FROM tasks
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks belonging to a story, oldest first
    ///
    /// An unknown story id yields an empty list, not an error.
    pub async fn list_by_story(pool: &PgPool, story_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, priority, status, story_id, estimated_hours,
                   assigned_user_id, started_at, ended_at, created_at, updated_at
            FROM tasks
            WHERE story_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(story_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update, running the status lifecycle rules
    ///
    /// Reads the current row, plans the effective status and date stamps,
    /// then writes everything in one statement. Concurrent updates are last
    /// write wins; there is no optimistic concurrency token.
    ///
    /// Returns None if the task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let plan = lifecycle::plan_update(&current, &data, Utc::now());

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                estimated_hours = COALESCE($5, estimated_hours),
                assigned_user_id = COALESCE($6, assigned_user_id),
                status = $7,
                started_at = $8,
                ended_at = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, priority, status, story_id, estimated_hours,
                      assigned_user_id, started_at, ended_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.estimated_hours)
        .bind(data.assigned_user_id)
        .bind(plan.status)
        .bind(plan.started_at)
        .bind(plan.ended_at)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_estimate_constant() {
        assert_eq!(MIN_ESTIMATED_HOURS, 0.5);
    }

    #[test]
    fn test_update_task_default_is_empty_patch() {
        let patch = UpdateTask::default();
        assert!(patch.name.is_none());
        assert!(patch.status.is_none());
        assert!(patch.assigned_user_id.is_none());
        assert!(patch.estimated_hours.is_none());
    }
}
