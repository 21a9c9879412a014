/// Database layer
///
/// - `pool`: PostgreSQL connection pool setup and health checks
/// - `migrations`: sqlx migration runner

pub mod migrations;
pub mod pool;

pub use pool::{create_pool, health_check, PoolConfig};
