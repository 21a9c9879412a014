/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{error::ApiError, middleware::security::security_headers};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::{auth::context::ActorContext, models::user::User};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<crate::config::Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: crate::config::Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /v1/                          # API v1 (actor-scoped)
///     ├── /users                    # User CRUD
///     ├── /projects                 # Project CRUD (cascade delete)
///     ├── /stories?project_id=      # Story CRUD (cascade delete)
///     ├── /tasks?story_id=          # Task CRUD + assignment lifecycle
///     ├── /session                  # Current user + active project
///     └── /init/seed                # Wipe and reseed demo data
/// ```
///
/// Every `/v1` request carries an `X-User-Id` header; the actor middleware
/// resolves it to an [`ActorContext`] which the permission gate consumes.
/// Reads are open to every role, mutations are re-checked server-side.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no actor required)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/", post(routes::users::create_user))
        .route("/:id", get(routes::users::get_user))
        .route("/:id", patch(routes::users::update_user))
        .route("/:id", delete(routes::users::delete_user));

    let project_routes = Router::new()
        .route("/", get(routes::projects::list_projects))
        .route("/", post(routes::projects::create_project))
        .route("/:id", get(routes::projects::get_project))
        .route("/:id", patch(routes::projects::update_project))
        .route("/:id", delete(routes::projects::delete_project));

    let story_routes = Router::new()
        .route("/", get(routes::stories::list_stories))
        .route("/", post(routes::stories::create_story))
        .route("/:id", get(routes::stories::get_story))
        .route("/:id", patch(routes::stories::update_story))
        .route("/:id", delete(routes::stories::delete_story));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", patch(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task));

    let session_routes = Router::new()
        .route("/", get(routes::session::get_session))
        .route("/active-project", put(routes::session::set_active_project));

    let init_routes = Router::new().route("/seed", post(routes::init::reseed));

    // All v1 routes require a resolvable actor.
    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/stories", story_routes)
        .nest("/tasks", task_routes)
        .nest("/session", session_routes)
        .nest("/init", init_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            actor_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn(move |req, next| {
            security_headers(req, next, production)
        }))
        .with_state(state)
}

/// Actor resolution middleware
///
/// The identity provider in front of the API hands us a user id in the
/// `X-User-Id` header. The middleware resolves it against the users table
/// and injects an [`ActorContext`] into request extensions; the role it
/// carries drives every permission check downstream.
async fn actor_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

    let user_id = header
        .parse::<uuid::Uuid>()
        .map_err(|_| ApiError::BadRequest("X-User-Id must be a UUID".to_string()))?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    req.extensions_mut().insert(ActorContext::from_user(&user));

    Ok(next.run(req).await)
}
