/// Task management endpoints
///
/// # Endpoints
///
/// - `GET    /v1/tasks?story_id=` - List tasks, optionally by story
/// - `GET    /v1/tasks/:id` - Get a task
/// - `POST   /v1/tasks` - Create a task under a story
/// - `PATCH  /v1/tasks/:id` - Update a task
/// - `DELETE /v1/tasks/:id` - Delete a task
///
/// The update path runs the status lifecycle: assigning a user to a todo
/// task advances it to doing and stamps `started_at`, an explicit done
/// stamps `ended_at`, and neither stamp is ever cleared. Assignment also
/// requires the assign-tasks capability on top of modify.

use crate::{
    app::AppState,
    error::{validation_failure, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{context::ActorContext, permissions},
    models::{
        story::Story,
        task::{CreateTask, Task, UpdateTask},
        types::{Priority, WorkStatus},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

use super::users::SuccessResponse;

/// Task representation at the API boundary
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: String,

    /// Task name
    pub name: String,

    /// Description
    pub description: String,

    /// Priority
    pub priority: Priority,

    /// Board column
    pub status: WorkStatus,

    /// Owning story ID
    pub story_id: String,

    /// Estimated effort in hours
    pub estimated_hours: f64,

    /// Assignee ID, if any
    pub assigned_user_id: Option<String>,

    /// When work started
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When work finished
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Created at
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name,
            description: task.description,
            priority: task.priority,
            status: task.status,
            story_id: task.story_id.to_string(),
            estimated_hours: task.estimated_hours,
            assigned_user_id: task.assigned_user_id.map(|id| id.to_string()),
            started_at: task.started_at,
            ended_at: task.ended_at,
            created_at: task.created_at,
        }
    }
}

/// List filter
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Restrict to one story
    pub story_id: Option<Uuid>,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Priority
    pub priority: Priority,

    /// Owning story (must exist)
    pub story_id: Uuid,

    /// Estimated effort in hours
    #[validate(range(min = 0.5, message = "Estimate must be at least 0.5 hours"))]
    pub estimated_hours: f64,

    /// Optional initial assignee (must exist)
    pub assigned_user_id: Option<Uuid>,
}

/// Update task request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New task name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<Priority>,

    /// New board column
    pub status: Option<WorkStatus>,

    /// New estimate in hours
    #[validate(range(min = 0.5, message = "Estimate must be at least 0.5 hours"))]
    pub estimated_hours: Option<f64>,

    /// Assign the task to a user (must exist)
    pub assigned_user_id: Option<Uuid>,
}

/// List tasks, optionally filtered by story
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = match query.story_id {
        Some(story_id) => Task::list_by_story(&state.db, story_id).await?,
        None => Task::list_all(&state.db).await?,
    };

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Get a task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task {} not found", id)))?;

    Ok(Json(task.into()))
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    permissions::require_create(actor.role)?;
    req.validate().map_err(validation_failure)?;

    Story::find_by_id(&state.db, req.story_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("story {} not found", req.story_id)))?;

    if let Some(assignee) = req.assigned_user_id {
        permissions::require_assign_tasks(actor.role)?;
        User::find_by_id(&state.db, assignee)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {} not found", assignee)))?;
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            name: req.name,
            description: req.description,
            priority: req.priority,
            story_id: req.story_id,
            estimated_hours: req.estimated_hours,
            assigned_user_id: req.assigned_user_id,
        },
    )
    .await?;

    Ok(Json(task.into()))
}

/// Update a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    permissions::require_modify(actor.role)?;
    req.validate().map_err(validation_failure)?;

    if let Some(assignee) = req.assigned_user_id {
        permissions::require_assign_tasks(actor.role)?;
        User::find_by_id(&state.db, assignee)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {} not found", assignee)))?;
    }

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            name: req.name,
            description: req.description,
            priority: req.priority,
            status: req.status,
            estimated_hours: req.estimated_hours,
            assigned_user_id: req.assigned_user_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("task {} not found", id)))?;

    Ok(Json(task.into()))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    permissions::require_delete(actor.role)?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("task {} not found", id)));
    }

    Ok(Json(SuccessResponse { success: true }))
}
