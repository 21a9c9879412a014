/// Project management endpoints
///
/// # Endpoints
///
/// - `GET    /v1/projects` - List projects
/// - `GET    /v1/projects/:id` - Get a project
/// - `POST   /v1/projects` - Create a project
/// - `PATCH  /v1/projects/:id` - Update a project
/// - `DELETE /v1/projects/:id` - Delete a project and everything under it
///
/// Delete cascades to stories and tasks, children first, inside one
/// transaction.

use crate::{
    app::AppState,
    error::{validation_failure, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{context::ActorContext, permissions},
    models::project::{CreateProject, Project, UpdateProject},
};
use uuid::Uuid;
use validator::Validate;

use super::users::SuccessResponse;

/// Project representation at the API boundary
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID
    pub id: String,

    /// Project name
    pub name: String,

    /// Description
    pub description: String,

    /// Created at
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name,
            description: project.description,
            created_at: project.created_at,
        }
    }
}

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,
}

/// Update project request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// New project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,
}

/// List projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = Project::list_all(&state.db).await?;
    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Get a project by id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("project {} not found", id)))?;

    Ok(Json(project.into()))
}

/// Create a project
pub async fn create_project(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    permissions::require_create(actor.role)?;
    req.validate().map_err(validation_failure)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
        },
    )
    .await?;

    Ok(Json(project.into()))
}

/// Update a project
pub async fn update_project(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    permissions::require_modify(actor.role)?;
    req.validate().map_err(validation_failure)?;

    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("project {} not found", id)))?;

    Ok(Json(project.into()))
}

/// Delete a project with cascade
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    permissions::require_delete(actor.role)?;

    Project::delete_cascade(&state.db, id).await?;

    Ok(Json(SuccessResponse { success: true }))
}
