/// User management endpoints
///
/// # Endpoints
///
/// - `GET    /v1/users` - List users
/// - `GET    /v1/users/:id` - Get a user
/// - `POST   /v1/users` - Create a user
/// - `PATCH  /v1/users/:id` - Update a user
/// - `DELETE /v1/users/:id` - Delete a user
///
/// The `role` field travels as a string and is parsed against the closed
/// role enum; anything outside {admin, devops, developer, guest} is a
/// `400 Bad Request`, never a silent deny.

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
    models::user::{CreateUser, Role, UpdateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// User representation at the API boundary
///
/// Ids are plain strings; this is the shape every other module reuses when
/// it embeds a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Role
    pub role: Role,

    /// Contact email
    pub email: Option<String>,

    /// Active project selection
    pub default_project_id: Option<String>,

    /// Created at
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            email: user.email,
            default_project_id: user.default_project_id.map(|id| id.to_string()),
            created_at: user.created_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Given name
    #[validate(length(min = 1, max = 255, message = "First name must be 1-255 characters"))]
    pub first_name: String,

    /// Family name
    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    pub last_name: String,

    /// Role string, one of admin/devops/developer/guest
    pub role: String,

    /// Optional contact email
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New given name
    #[validate(length(min = 1, max = 255, message = "First name must be 1-255 characters"))]
    pub first_name: Option<String>,

    /// New family name
    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    pub last_name: Option<String>,

    /// New role string
    pub role: Option<String>,

    /// New contact email
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Whether the operation succeeded
    pub success: bool,
}

/// List users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;

    Ok(Json(user.into()))
}

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    permissions::require_create(actor.role)?;
    req.validate().map_err(validation_failure)?;

    let role: Role = req.role.parse().map_err(ApiError::from)?;

    let user = User::create(
        &state.db,
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            role,
            email: req.email,
        },
    )
    .await?;

    Ok(Json(user.into()))
}

/// Update a user
pub async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    permissions::require_modify(actor.role)?;
    req.validate().map_err(validation_failure)?;

    let role = match req.role {
        Some(value) => Some(value.parse::<Role>().map_err(ApiError::from)?),
        None => None,
    };

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            role,
            email: req.email,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;

    Ok(Json(user.into()))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    permissions::require_delete(actor.role)?;

    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("user {} not found", id)));
    }

    Ok(Json(SuccessResponse { success: true }))
}
