use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (the pool is an `Arc` internally, config is behind one).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: campushub_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
}
