/// Database models
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and their roles
/// - `project`: Top-level projects owning stories
/// - `story`: Units of work under a project, each owned by a user
/// - `task`: Units of work under a story, optionally assigned to a user
/// - `types`: Status and priority enums shared by stories and tasks
/// - `lifecycle`: Status-transition and date-stamping rules for tasks
///
/// # Hierarchy
///
/// ```text
/// Project 1──* Story 1──* Task
///                │          │
///                owner      assignee (optional)
/// ```
///
/// Deleting a project or story cascades to its descendants, children first,
/// inside one transaction.

pub mod lifecycle;
pub mod project;
pub mod story;
pub mod task;
pub mod types;
pub mod user;
