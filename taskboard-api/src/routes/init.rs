/// Demo data seeding endpoint
///
/// # Endpoints
///
/// - `POST /v1/init/seed` - Wipe all collections and reseed the demo
///   dataset
///
/// Reseeding destroys data, so it requires the delete capability
/// (admin or devops). The startup auto-seed path lives in
/// `taskboard_shared::seed` and only fires on an empty database.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use taskboard_shared::{
    auth::{context::ActorContext, permissions},
    seed,
};

use super::users::SuccessResponse;

/// Wipe and reseed the demo dataset
pub async fn reseed(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorContext>,
) -> ApiResult<Json<SuccessResponse>> {
    permissions::require_delete(actor.role)?;

    seed::seed_demo_data(&state.db).await?;

    Ok(Json(SuccessResponse { success: true }))
}
