/// Story model and database operations
///
/// Stories are units of work under a project, each owned by one user and
/// tracked through the todo/doing/done board. Deleting a story cascades to
/// its tasks first.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE stories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     priority work_priority NOT NULL DEFAULT 'medium',
///     status work_status NOT NULL DEFAULT 'todo',
///     project_id UUID NOT NULL REFERENCES projects(id),
///     owner_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::types::{Priority, WorkStatus};
use crate::error::DomainError;

/// Story model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    /// Unique story ID
    pub id: Uuid,

    /// Story name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Priority on the board
    pub priority: Priority,

    /// Board column
    pub status: WorkStatus,

    /// Owning project
    pub project_id: Uuid,

    /// User responsible for the story
    pub owner_id: Uuid,

    /// When the story was created
    pub created_at: DateTime<Utc>,

    /// When the story was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new story
///
/// Status always starts at todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStory {
    /// Story name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Priority on the board
    pub priority: Priority,

    /// Owning project (must exist)
    pub project_id: Uuid,

    /// User responsible for the story (must exist)
    pub owner_id: Uuid,
}

/// Input for updating an existing story
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStory {
    /// New story name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<Priority>,

    /// New board column
    pub status: Option<WorkStatus>,

    /// New owner (must exist)
    pub owner_id: Option<Uuid>,
}

impl Story {
    /// Creates a new story in todo status
    pub async fn create(pool: &PgPool, data: CreateStory) -> Result<Self, sqlx::Error> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (name, description, priority, project_id, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, priority, status, project_id, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(story)
    }

    /// Finds a story by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, name, description, priority, status, project_id, owner_id,
                   created_at, updated_at
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    /// Lists all stories, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let stories = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, name, description, priority, status, project_id, owner_id,
                   created_at, updated_at
            FROM stories
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stories)
    }

    /// Lists stories belonging to a project, oldest first
    ///
    /// An unknown project id yields an empty list, not an error.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let stories = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, name, description, priority, status, project_id, owner_id,
                   created_at, updated_at
            FROM stories
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(stories)
    }

    /// Applies a partial update
    ///
    /// Returns None if the story does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateStory,
    ) -> Result<Option<Self>, sqlx::Error> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            UPDATE stories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                status = COALESCE($5, status),
                owner_id = COALESCE($6, owner_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, priority, status, project_id, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.status)
        .bind(data.owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    /// Deletes a story and its tasks
    ///
    /// Tasks go first, then the story, inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the story does not exist.
    pub async fn delete_cascade(pool: &PgPool, id: Uuid) -> Result<u64, DomainError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM stories WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists {
            return Err(DomainError::not_found("story", id));
        }

        let tasks_deleted = sqlx::query("DELETE FROM tasks WHERE story_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(story_id = %id, tasks_deleted, "Story deleted with cascade");

        Ok(tasks_deleted)
    }
}
