/// Per-request actor context
///
/// The identity the permission gate is evaluated against. Session handling
/// lives outside this system; an upstream identity provider hands the API a
/// user id per request, and the API resolves it to `{id, role}` here. The
/// context is explicit request state, never a process-wide singleton, so
/// handlers and tests stay deterministic.

use uuid::Uuid;

use crate::models::user::{Role, User};

/// Resolved actor identity for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    /// Acting user's ID
    pub user_id: Uuid,

    /// Acting user's role
    pub role: Role,
}

impl ActorContext {
    /// Builds a context from a loaded user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
        }
    }
}

impl From<&User> for ActorContext {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_from_user_carries_id_and_role() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::Devops,
            email: None,
            default_project_id: None,
            created_at: now,
            updated_at: now,
        };

        let ctx = ActorContext::from_user(&user);
        assert_eq!(ctx.user_id, user.id);
        assert_eq!(ctx.role, Role::Devops);
    }
}
