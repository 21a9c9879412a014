/// Session endpoints
///
/// The client-side "current user + active project" state lives here as
/// explicit server state instead of a process-wide singleton: the active
/// project is the user's `default_project_id`, and the client rehydrates
/// with a single GET on load.
///
/// # Endpoints
///
/// - `GET /v1/session` - Current user and resolved active project
/// - `PUT /v1/session/active-project` - Select (or clear) the active project

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::context::ActorContext,
    models::{project::Project, user::User},
};
use uuid::Uuid;

use super::{projects::ProjectResponse, users::UserResponse};

/// Session response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Acting user
    pub user: UserResponse,

    /// Active project, if one is selected and still exists
    pub active_project: Option<ProjectResponse>,
}

/// Active-project selection request
#[derive(Debug, Deserialize)]
pub struct SetActiveProjectRequest {
    /// Project to select; null clears the selection
    pub project_id: Option<Uuid>,
}

/// Current user and active project
pub async fn get_session(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<SessionResponse>> {
    let user = User::find_by_id(&state.db, actor.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    let active_project = match user.default_project_id {
        Some(project_id) => Project::find_by_id(&state.db, project_id).await?,
        None => None,
    };

    Ok(Json(SessionResponse {
        user: user.into(),
        active_project: active_project.map(ProjectResponse::from),
    }))
}

/// Select or clear the active project
///
/// Any role may do this; it is the actor's own view state, not entity
/// data.
pub async fn set_active_project(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(req): Json<SetActiveProjectRequest>,
) -> ApiResult<Json<SessionResponse>> {
    if let Some(project_id) = req.project_id {
        Project::find_by_id(&state.db, project_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("project {} not found", project_id)))?;
    }

    let user = User::set_default_project(&state.db, actor.user_id, req.project_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    let active_project = match user.default_project_id {
        Some(project_id) => Project::find_by_id(&state.db, project_id).await?,
        None => None,
    };

    Ok(Json(SessionResponse {
        user: user.into(),
        active_project: active_project.map(ProjectResponse::from),
    }))
}
