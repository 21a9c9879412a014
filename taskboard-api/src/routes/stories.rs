/// Story management endpoints
///
/// # Endpoints
///
/// - `GET    /v1/stories?project_id=` - List stories, optionally by project
/// - `GET    /v1/stories/:id` - Get a story
/// - `POST   /v1/stories` - Create a story under a project
/// - `PATCH  /v1/stories/:id` - Update a story
/// - `DELETE /v1/stories/:id` - Delete a story and its tasks
///
/// Creation checks that the referenced project and owner exist; an unknown
/// parent is a `404 Not Found`. Filtering by an unknown project id returns
/// an empty list.

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
        project::Project,
        story::{CreateStory, Story, UpdateStory},
        types::{Priority, WorkStatus},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

use super::users::SuccessResponse;

/// Story representation at the API boundary
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    /// Story ID
    pub id: String,

    /// Story name
    pub name: String,

    /// Description
    pub description: String,

    /// Priority
    pub priority: Priority,

    /// Board column
    pub status: WorkStatus,

    /// Owning project ID
    pub project_id: String,

    /// Owning user ID
    pub owner_id: String,

    /// Created at
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            id: story.id.to_string(),
            name: story.name,
            description: story.description,
            priority: story.priority,
            status: story.status,
            project_id: story.project_id.to_string(),
            owner_id: story.owner_id.to_string(),
            created_at: story.created_at,
        }
    }
}

/// List filter
#[derive(Debug, Default, Deserialize)]
pub struct ListStoriesQuery {
    /// Restrict to one project
    pub project_id: Option<Uuid>,
}

/// Create story request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoryRequest {
    /// Story name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Priority
    pub priority: Priority,

    /// Owning project (must exist)
    pub project_id: Uuid,

    /// Owning user (must exist)
    pub owner_id: Uuid,
}

/// Update story request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStoryRequest {
    /// New story name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
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

/// List stories, optionally filtered by project
pub async fn list_stories(
    State(state): State<AppState>,
    Query(query): Query<ListStoriesQuery>,
) -> ApiResult<Json<Vec<StoryResponse>>> {
    let stories = match query.project_id {
        Some(project_id) => Story::list_by_project(&state.db, project_id).await?,
        None => Story::list_all(&state.db).await?,
    };

    Ok(Json(stories.into_iter().map(StoryResponse::from).collect()))
}

/// Get a story by id
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StoryResponse>> {
    let story = Story::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("story {} not found", id)))?;

    Ok(Json(story.into()))
}

/// Create a story
pub async fn create_story(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(req): Json<CreateStoryRequest>,
) -> ApiResult<Json<StoryResponse>> {
    permissions::require_create(actor.role)?;
    req.validate().map_err(validation_failure)?;

    // Referential integrity is enforced here, not left to the store.
    Project::find_by_id(&state.db, req.project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("project {} not found", req.project_id)))?;
    User::find_by_id(&state.db, req.owner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", req.owner_id)))?;

    let story = Story::create(
        &state.db,
        CreateStory {
            name: req.name,
            description: req.description,
            priority: req.priority,
            project_id: req.project_id,
            owner_id: req.owner_id,
        },
    )
    .await?;

    Ok(Json(story.into()))
}

/// Update a story
pub async fn update_story(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStoryRequest>,
) -> ApiResult<Json<StoryResponse>> {
    permissions::require_modify(actor.role)?;
    req.validate().map_err(validation_failure)?;

    if let Some(owner_id) = req.owner_id {
        User::find_by_id(&state.db, owner_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("user {} not found", owner_id)))?;
    }

    let story = Story::update(
        &state.db,
        id,
        UpdateStory {
            name: req.name,
            description: req.description,
            priority: req.priority,
            status: req.status,
            owner_id: req.owner_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("story {} not found", id)))?;

    Ok(Json(story.into()))
}

/// Delete a story with cascade
pub async fn delete_story(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    permissions::require_delete(actor.role)?;

    Story::delete_cascade(&state.db, id).await?;

    Ok(Json(SuccessResponse { success: true }))
}
