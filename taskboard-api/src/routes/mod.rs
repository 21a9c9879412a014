/// API route handlers
///
/// Handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD
/// - `projects`: Project CRUD with cascade delete
/// - `stories`: Story CRUD with cascade delete and project filter
/// - `tasks`: Task CRUD with assignment lifecycle and story filter
/// - `session`: Current user and active-project selection
/// - `init`: Demo data seeding
///
/// Every response serializes relational ids as plain strings; internal
/// `Uuid`s never cross the API boundary in another form.

pub mod health;
pub mod init;
pub mod projects;
pub mod session;
pub mod stories;
pub mod tasks;
pub mod users;
