/// Error handling for the API server
///
/// A unified error type that maps domain failures to HTTP responses. All
/// handlers return `Result<T, ApiError>`, which converts into a JSON body
/// of the shape `{error, message, details?}` with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskboard_shared::error::DomainError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - malformed input, unknown role string
    BadRequest(String),

    /// Unauthorized (401) - unresolvable actor identity
    Unauthorized(String),

    /// Forbidden (403) - permission gate denied the action
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - constraint violation
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "forbidden")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Check constraint violations: the estimate floor surfaces
                // as a validation failure, references as conflicts.
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("estimated_hours") {
                        return ApiError::ValidationError(vec![ValidationErrorDetail {
                            field: "estimated_hours".to_string(),
                            message: "Estimate must be at least 0.5 hours".to_string(),
                        }]);
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert domain errors to API errors
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DomainError::Validation(msg) => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "payload".to_string(),
                message: msg,
            }]),
            DomainError::Permission(inner) => ApiError::Forbidden(inner.to_string()),
            DomainError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            DomainError::Database(inner) => ApiError::from(inner),
        }
    }
}

/// Convert permission errors to API errors
impl From<taskboard_shared::auth::permissions::PermissionError> for ApiError {
    fn from(err: taskboard_shared::auth::permissions::PermissionError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

/// Maps `validator` failures onto the 422 details shape
pub fn validation_failure(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    ApiError::ValidationError(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_shared::auth::permissions::require_delete;
    use taskboard_shared::models::user::Role;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_validation_error_display() {
        let errors = vec![
            ValidationErrorDetail {
                field: "name".to_string(),
                message: "Name is required".to_string(),
            },
            ValidationErrorDetail {
                field: "estimated_hours".to_string(),
                message: "Estimate must be at least 0.5 hours".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_domain_not_found_maps_to_not_found() {
        let err: ApiError = DomainError::not_found("story", "s-1").into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_permission_error_maps_to_forbidden() {
        let denied = require_delete(Role::Guest).unwrap_err();
        let err: ApiError = denied.into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_invalid_role_maps_to_bad_request() {
        let err: ApiError = DomainError::InvalidRole("root".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
