/// Role-based permission gate
///
/// Pure, stateless predicates over a [`Role`]. The matrix:
///
/// | capability       | guest | developer | devops | admin |
/// |------------------|-------|-----------|--------|-------|
/// | can_create       | no    | yes       | yes    | yes   |
/// | can_modify       | no    | yes       | yes    | yes   |
/// | can_delete       | no    | no        | yes    | yes   |
/// | can_assign_tasks | no    | yes       | yes    | yes   |
/// | is_read_only     | yes   | no        | no     | no    |
///
/// Every mutation handler re-checks these server-side; the gate never
/// trusts a client to have filtered actions already. Matches are
/// exhaustive, so a new role variant forces every predicate to take a
/// position.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::permissions::{can_delete, require_delete};
/// use taskboard_shared::models::user::Role;
///
/// assert!(can_delete(Role::Devops));
/// assert!(require_delete(Role::Guest).is_err());
/// ```

use crate::models::user::Role;

/// Error type for failed permission checks
#[derive(Debug, Clone, thiserror::Error)]
#[error("role {role:?} may not {action}")]
pub struct PermissionError {
    /// Action the actor attempted
    pub action: &'static str,

    /// Role the actor holds
    pub role: Role,
}

/// Whether the role may create entities
pub fn can_create(role: Role) -> bool {
    match role {
        Role::Admin | Role::Devops | Role::Developer => true,
        Role::Guest => false,
    }
}

/// Whether the role may modify entities
pub fn can_modify(role: Role) -> bool {
    match role {
        Role::Admin | Role::Devops | Role::Developer => true,
        Role::Guest => false,
    }
}

/// Whether the role may delete entities
pub fn can_delete(role: Role) -> bool {
    match role {
        Role::Admin | Role::Devops => true,
        Role::Developer | Role::Guest => false,
    }
}

/// Whether the role may assign tasks to users
pub fn can_assign_tasks(role: Role) -> bool {
    match role {
        Role::Admin | Role::Devops | Role::Developer => true,
        Role::Guest => false,
    }
}

/// Whether the role is limited to reading
pub fn is_read_only(role: Role) -> bool {
    match role {
        Role::Guest => true,
        Role::Admin | Role::Devops | Role::Developer => false,
    }
}

/// Requires create capability
pub fn require_create(role: Role) -> Result<(), PermissionError> {
    if can_create(role) {
        Ok(())
    } else {
        Err(PermissionError {
            action: "create",
            role,
        })
    }
}

/// Requires modify capability
pub fn require_modify(role: Role) -> Result<(), PermissionError> {
    if can_modify(role) {
        Ok(())
    } else {
        Err(PermissionError {
            action: "modify",
            role,
        })
    }
}

/// Requires delete capability
pub fn require_delete(role: Role) -> Result<(), PermissionError> {
    if can_delete(role) {
        Ok(())
    } else {
        Err(PermissionError {
            action: "delete",
            role,
        })
    }
}

/// Requires task-assignment capability
pub fn require_assign_tasks(role: Role) -> Result<(), PermissionError> {
    if can_assign_tasks(role) {
        Ok(())
    } else {
        Err(PermissionError {
            action: "assign tasks",
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 4] = [Role::Admin, Role::Devops, Role::Developer, Role::Guest];

    #[test]
    fn test_delete_is_devops_or_admin_only() {
        for role in ALL_ROLES {
            let expected = matches!(role, Role::Admin | Role::Devops);
            assert_eq!(can_delete(role), expected, "can_delete({:?})", role);
        }
    }

    #[test]
    fn test_create_modify_assign_agree_for_every_role() {
        for role in ALL_ROLES {
            let expected = role != Role::Guest;
            assert_eq!(can_create(role), expected, "can_create({:?})", role);
            assert_eq!(can_modify(role), expected, "can_modify({:?})", role);
            assert_eq!(can_assign_tasks(role), expected, "can_assign_tasks({:?})", role);
        }
    }

    #[test]
    fn test_read_only_is_guest_only() {
        for role in ALL_ROLES {
            assert_eq!(is_read_only(role), role == Role::Guest);
        }
    }

    #[test]
    fn test_require_helpers_mirror_predicates() {
        assert!(require_create(Role::Developer).is_ok());
        assert!(require_modify(Role::Devops).is_ok());
        assert!(require_delete(Role::Admin).is_ok());
        assert!(require_assign_tasks(Role::Developer).is_ok());

        assert!(require_create(Role::Guest).is_err());
        assert!(require_modify(Role::Guest).is_err());
        assert!(require_delete(Role::Developer).is_err());
        assert!(require_assign_tasks(Role::Guest).is_err());
    }

    #[test]
    fn test_permission_error_display() {
        let err = require_delete(Role::Developer).unwrap_err();
        assert!(err.to_string().contains("Developer"));
        assert!(err.to_string().contains("delete"));
    }
}
