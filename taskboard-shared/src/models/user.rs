/// User model and database operations
///
/// Users carry the role that drives the permission gate. Roles never change
/// automatically; only an explicit update can reassign one.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'devops', 'developer', 'guest');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     first_name VARCHAR(255) NOT NULL,
///     last_name VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'guest',
///     email VARCHAR(320),
///     default_project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;

/// User role driving the permission gate
///
/// A closed enum: role strings outside this set fail parsing loudly rather
/// than falling through to a silent deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including destructive operations
    Admin,

    /// Like developer, plus delete rights
    Devops,

    /// Can create, modify, and assign work
    Developer,

    /// Read-only access
    Guest,
}

impl Role {
    /// Converts role to string for logs and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Devops => "devops",
            Role::Developer => "developer",
            Role::Guest => "guest",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "devops" => Ok(Role::Devops),
            "developer" => Ok(Role::Developer),
            "guest" => Ok(Role::Guest),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// User model representing an account known to the board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Role driving the permission gate
    pub role: Role,

    /// Optional contact email
    pub email: Option<String>,

    /// Project selected as the user's active project (None if never chosen)
    pub default_project_id: Option<Uuid>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Role to grant
    pub role: Role,

    /// Optional contact email
    pub email: Option<String>,
}

/// Input for updating an existing user
///
/// All fields are optional. Only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New given name
    pub first_name: Option<String>,

    /// New family name
    pub last_name: Option<String>,

    /// New role
    pub role: Option<Role>,

    /// New contact email
    pub email: Option<String>,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, role, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, role, email, default_project_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.role)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, role, email, default_project_id,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, role, email, default_project_id,
                   created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Applies a partial update
    ///
    /// Returns None if the user does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                role = COALESCE($4, role),
                email = COALESCE($5, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, role, email, default_project_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.role)
        .bind(data.email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Sets or clears the user's active project selection
    ///
    /// Returns None if the user does not exist.
    pub async fn set_default_project(
        pool: &PgPool,
        id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET default_project_id = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, role, email, default_project_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user
    ///
    /// Fails with a constraint violation if the user still owns stories.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Devops.as_str(), "devops");
        assert_eq!(Role::Developer.as_str(), "developer");
        assert_eq!(Role::Guest.as_str(), "guest");
    }

    #[test]
    fn test_role_from_str_known_values() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("devops".parse::<Role>().unwrap(), Role::Devops);
        assert_eq!("developer".parse::<Role>().unwrap(), Role::Developer);
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
    }

    #[test]
    fn test_role_from_str_unknown_value_fails_loudly() {
        let err = "superuser".parse::<Role>().unwrap_err();
        match err {
            DomainError::InvalidRole(value) => assert_eq!(value, "superuser"),
            other => panic!("expected InvalidRole, got {:?}", other),
        }
    }

    #[test]
    fn test_role_serde_rejects_unknown_value() {
        let result: Result<Role, _> = serde_json::from_str("\"root\"");
        assert!(result.is_err());
    }
}
