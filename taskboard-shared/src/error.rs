/// Domain error taxonomy
///
/// Every fallible operation in this crate surfaces one of these variants.
/// The API server maps them onto HTTP status codes; nothing here knows
/// about HTTP.

use crate::auth::permissions::PermissionError;

/// Domain result type alias
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors produced by the model and permission layers
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input violated a schema or value constraint
    #[error("validation failed: {0}")]
    Validation(String),

    /// Actor's role does not permit the attempted action
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Role string outside the known enum
    #[error("unknown role: {0:?}")]
    InvalidRole(String),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    /// Shorthand for a not-found error on a named entity kind
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DomainError::not_found("project", "abc-123");
        assert_eq!(err.to_string(), "project abc-123 not found");
    }

    #[test]
    fn test_invalid_role_display() {
        let err = DomainError::InvalidRole("superuser".to_string());
        assert!(err.to_string().contains("superuser"));
    }
}
